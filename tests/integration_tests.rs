//! Integration tests for annotation files on disk

use std::fs;
use std::path::PathBuf;

use stratum_annotations::{
    load_audio_file, load_beats, load_chords, load_events, load_onsets, load_tempo,
    write_beats, write_chords, write_events, write_tempo, AnnotationError, Array, AudioOptions,
    ChordSegment, Source, TempoOptions, TempoReport, Values,
};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.txt");
        let events = vec![0.0123, 1.5, 2.71828, 10.0004];

        write_events(&events, path.as_path()).unwrap();
        let loaded = load_events(path.as_path()).unwrap();
        write_events(&loaded, path.as_path()).unwrap();
        let reloaded = load_events(path.as_path()).unwrap();

        assert_eq!(reloaded.len(), events.len());
        for (original, read) in events.iter().zip(&reloaded) {
            assert!(
                (original - read).abs() <= 0.0005 + 1e-12,
                "{} read back as {}",
                original,
                read
            );
        }
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "0.012\n1.500\n2.718\n10.000\n"
        );
    }

    #[test]
    fn test_onsets_from_file_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = temp_file(&dir, "onsets.txt", "# onset annotations\n0.25\t0.9\n0.75\t0.4\n");
        assert_eq!(load_onsets(path.as_path()).unwrap(), vec![0.25, 0.75]);
    }

    #[test]
    fn test_beats_and_downbeats_from_file() {
        let dir = TempDir::new().unwrap();
        let path = temp_file(
            &dir,
            "beats.txt",
            "0.50\t1\n1.00\t2\n1.50\t3\n2.00\t1\n2.50\t2\n3.00\t3\n",
        );
        assert_eq!(
            load_beats(path.as_path(), false).unwrap(),
            vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0]
        );
        assert_eq!(load_beats(path.as_path(), true).unwrap(), vec![0.5, 2.0]);
    }

    #[test]
    fn test_beats_written_with_numbers_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beats.txt");
        let beats = Array::try_from(vec![vec![0.5, 1.0], vec![1.0, 2.0], vec![1.5, 1.0]]).unwrap();

        write_beats(&beats, path.as_path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0.500\t1\n1.000\t2\n1.500\t1\n");
        assert_eq!(load_beats(path.as_path(), true).unwrap(), vec![0.5, 1.5]);
    }

    #[test]
    fn test_chords_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chords.txt");
        let chords = vec![
            ChordSegment::new(0.0, 2.5, "F#:min"),
            ChordSegment::new(2.5, 4.0, "N"),
            ChordSegment::new(4.0, 6.25, "Bb:maj7"),
        ];

        write_chords(&chords, path.as_path()).unwrap();
        assert_eq!(load_chords(path.as_path()).unwrap(), chords);
    }

    #[test]
    fn test_tempo_file_to_mirex_report() {
        let dir = TempDir::new().unwrap();
        let input = temp_file(&dir, "tempo.txt", "126.0 63.0 0.58\n");
        let output = dir.path().join("tempo.out");

        let options = TempoOptions {
            sort: true,
            max_len: Some(2),
            ..TempoOptions::default()
        };
        let tempi = load_tempo(input.as_path(), &options).unwrap();
        let report = write_tempo(&tempi, output.as_path(), true).unwrap();

        assert_eq!(report.tempo_1, 63.0);
        assert_eq!(report.tempo_2, 126.0);
        assert!((report.strength - 0.42).abs() < 1e-9);
        assert_eq!(fs::read_to_string(&output).unwrap(), "63.00\t126.00\t0.42\n");
    }

    #[test]
    fn test_tempo_report_written_then_reloaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tempo.txt");
        let tempi = load_tempo(vec![140.0], &TempoOptions::default()).unwrap();
        write_tempo(&tempi, path.as_path(), false).unwrap();

        // "140.00 70.00 1.00": the strength 1.0 sits at the split value
        let reloaded = load_tempo(path.as_path(), &TempoOptions::default()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].tempo, 140.0);
        assert_eq!(reloaded[1].tempo, 70.0);
        assert_eq!(reloaded[1].strength, 0.0);
    }

    #[test]
    fn test_tempo_report_serializes() {
        let report = TempoReport {
            tempo_1: 60.0,
            tempo_2: 120.0,
            strength: 0.25,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"tempo_1":60.0,"tempo_2":120.0,"strength":0.25}"#);
        let back: TempoReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_loader_input_kinds() {
        let mut reader = std::io::Cursor::new("0.1\n0.2\n");
        assert_eq!(
            load_onsets(Source::from(&mut reader)).unwrap(),
            vec![0.1, 0.2]
        );
        assert_eq!(load_onsets(vec![0.3]).unwrap(), vec![0.3]);
        assert!(load_onsets(Values::Empty).unwrap().is_empty());
        assert!(load_onsets(None::<Array>).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = temp_file(&dir, "bad.txt", "0.5\n# fine\n0.7\nx.y\n");
        let err = load_onsets(path.as_path()).unwrap_err();
        assert_eq!(
            err,
            AnnotationError::Parse {
                line: 4,
                message: "could not convert 'x.y' to float".to_string()
            }
        );
    }

    #[test]
    fn test_load_audio_file_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("click.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..800 {
            let value: i16 = if i % 80 == 0 { 16384 } else { 0 };
            writer.write_sample(value).unwrap();
            writer.write_sample(value).unwrap();
        }
        writer.finalize().unwrap();

        let stereo = load_audio_file(&path, &AudioOptions::default()).unwrap();
        assert_eq!(stereo.sample_rate, 8000);
        assert_eq!(stereo.num_channels, 2);
        assert_eq!(stereo.num_frames(), 800);

        let mono = load_audio_file(&path, &AudioOptions { mono: true }).unwrap();
        assert_eq!(mono.num_channels, 1);
        assert_eq!(mono.samples.len(), 800);
        assert!((mono.samples[0] - 0.5).abs() < 1e-3);
        assert!((mono.duration_seconds() - 0.1).abs() < 1e-9);
    }
}

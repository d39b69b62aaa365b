//! Tests for argument parsing and inbox processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use stitchbox::ConverterError;
    use stitchbox::io::cli::{Cli, FileProcessor, INBOX_CHAT};
    use stitchbox::io::configuration::{DEFAULT_EXCLUDED_FORMATS, REJECTION_MESSAGE};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stitchbox").chain(args.iter().copied())).unwrap()
    }

    fn write_emb1(path: &Path) {
        let mut bytes = b"EMB1".to_vec();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        for value in [10i16, 20, -5, 15] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        std::fs::write(path, bytes).unwrap();
    }

    fn archive_entries(path: &Path) -> Vec<String> {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    // Tests defaults for a bare target
    // Verified by defaulting quiet to true
    #[test]
    fn test_defaults() {
        let cli = parse(&["inbox"]);
        assert_eq!(cli.target, PathBuf::from("inbox"));
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert!(!cli.watch);
        assert_eq!(cli.interval, 5);
        assert_eq!(cli.log_level, "info");
        assert_eq!(
            cli.export_settings().excluded.len(),
            DEFAULT_EXCLUDED_FORMATS.len()
        );
    }

    // Tests extra exclusions are normalized and appended
    // Verified by replacing the default denylist with the extras
    #[test]
    fn test_exclude_flags() {
        let cli = parse(&["in", "-x", ".PES,dst"]);
        let excluded = cli.export_settings().excluded;
        assert!(excluded.contains(&"pes".to_string()));
        assert!(excluded.contains(&"dst".to_string()));
        assert!(excluded.contains(&"json".to_string()));

        let bare = parse(&["in", "--no-default-excludes", "-x", "exp"]);
        assert_eq!(bare.export_settings().excluded, vec!["exp".to_string()]);
    }

    // Tests the output directory falls back to the input's location
    // Verified by always using the working directory
    #[test]
    fn test_output_dir() {
        assert_eq!(parse(&["design.pes"]).output_dir(), PathBuf::from("."));
        assert_eq!(
            parse(&["inbox/design.pes"]).output_dir(),
            PathBuf::from("inbox")
        );
        assert_eq!(
            parse(&["inbox/design.pes", "-o", "out"]).output_dir(),
            PathBuf::from("out")
        );
    }

    // Tests a directory batch converts, rejects and skips archives
    // Verified by feeding existing zips back into the bot
    #[test]
    fn test_directory_batch() {
        let inbox = TempDir::new().unwrap();
        write_emb1(&inbox.path().join("rose.emb"));
        std::fs::write(inbox.path().join("notes.txt"), b"hello").unwrap();
        std::fs::write(inbox.path().join("old.zip"), b"PK").unwrap();

        let target = inbox.path().to_string_lossy().into_owned();
        let mut processor = FileProcessor::new(parse(&[&target, "-q"]));
        let summary = processor.process().unwrap();

        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.failed, 0);

        let archive = inbox.path().join("rose.zip");
        assert_eq!(archive_entries(&archive), vec!["rose_preview.png"]);
        // Processing notice for the delivery is gone; the rejection stays
        let visible = processor.transport().visible_texts(INBOX_CHAT);
        assert_eq!(visible.len(), 1);
        assert!(visible[0].starts_with(REJECTION_MESSAGE));
    }

    // Tests inputs whose archive exists are skipped unless forced
    // Verified by ignoring the no-skip flag
    #[test]
    fn test_skip_existing() {
        let inbox = TempDir::new().unwrap();
        let input = inbox.path().join("rose.emb");
        write_emb1(&input);
        std::fs::write(inbox.path().join("rose.zip"), b"stale").unwrap();

        let target = input.to_string_lossy().into_owned();
        let mut skipping = FileProcessor::new(parse(&[&target, "-q"]));
        assert_eq!(skipping.process().unwrap().total(), 0);

        let mut forced = FileProcessor::new(parse(&[&target, "-q", "-n"]));
        assert_eq!(forced.process().unwrap().delivered, 1);
        assert_ne!(std::fs::read(inbox.path().join("rose.zip")).unwrap(), b"stale");
    }

    // Tests undecodable input is a failed request, not a batch error
    // Verified by propagating the decode failure from process()
    #[test]
    fn test_decode_failure_isolated() {
        let inbox = TempDir::new().unwrap();
        std::fs::write(inbox.path().join("broken.pes"), b"not embroidery").unwrap();

        let target = inbox.path().to_string_lossy().into_owned();
        let mut processor = FileProcessor::new(parse(&[&target, "-q"]));
        let summary = processor.process().unwrap();

        assert_eq!(summary.failed, 1);
        assert!(!inbox.path().join("broken.zip").exists());
    }

    // Tests an unreadable input fails alone and the rest of the batch runs
    // Verified by propagating the read error out of run_once
    #[cfg(unix)]
    #[test]
    fn test_read_failure_isolated() {
        let inbox = TempDir::new().unwrap();
        // Regular file by metadata, but reading offset zero fails
        std::os::unix::fs::symlink("/proc/self/mem", inbox.path().join("a_bad.emb")).unwrap();
        write_emb1(&inbox.path().join("b_good.emb"));

        let target = inbox.path().to_string_lossy().into_owned();
        let mut processor = FileProcessor::new(parse(&[&target, "-q"]));
        let summary = processor.process().unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.delivered, 1);
        assert!(inbox.path().join("b_good.zip").exists());
        assert!(!inbox.path().join("a_bad.zip").exists());
    }

    // Tests the relay directory receives the original and the archive
    // Verified by relaying only the archive
    #[test]
    fn test_relay_copies() {
        let inbox = TempDir::new().unwrap();
        let relay = TempDir::new().unwrap();
        write_emb1(&inbox.path().join("rose.emb"));

        let target = inbox.path().to_string_lossy().into_owned();
        let relay_dir = relay.path().to_string_lossy().into_owned();
        let mut processor =
            FileProcessor::new(parse(&[&target, "-q", "--relay-dir", &relay_dir]));
        processor.process().unwrap();

        assert!(relay.path().join("rose.emb").exists());
        assert!(relay.path().join("rose.zip").exists());
    }

    // Tests a missing target is an invalid parameter
    // Verified by returning an empty summary
    #[test]
    fn test_missing_target() {
        let mut processor = FileProcessor::new(parse(&["/nonexistent/stitchbox/inbox", "-q"]));
        assert!(matches!(
            processor.process(),
            Err(ConverterError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));
    }

    // Tests watch mode rejects a zero poll interval before looping
    // Verified by sleeping zero seconds forever
    #[test]
    fn test_watch_zero_interval() {
        let inbox = TempDir::new().unwrap();
        let target = inbox.path().to_string_lossy().into_owned();
        let mut processor = FileProcessor::new(parse(&[&target, "-q", "-w", "--interval", "0"]));
        assert!(matches!(
            processor.process(),
            Err(ConverterError::InvalidParameter {
                parameter: "interval",
                ..
            })
        ));
    }

    // Tests the liveness endpoint starts with processing
    // Verified by never spawning the health server
    #[test]
    fn test_health_endpoint_started() {
        let inbox = TempDir::new().unwrap();
        let target = inbox.path().to_string_lossy().into_owned();
        let mut processor =
            FileProcessor::new(parse(&[&target, "-q", "--health-addr", "127.0.0.1:0"]));
        assert!(processor.health_addr().is_none());

        processor.process().unwrap();
        let addr = processor.health_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    // Tests archive naming follows the input stem
    // Verified by keeping the input extension in the name
    #[test]
    fn test_archive_path() {
        let processor = FileProcessor::new(parse(&["inbox/design.pes", "-o", "out"]));
        assert_eq!(
            processor.archive_path(Path::new("inbox/design.pes")),
            PathBuf::from("out/design.zip")
        );
    }
}

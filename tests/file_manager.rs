// Tests for file handling and the command-line front end

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gcode_timer::cli::{run, Cli};
    use gcode_timer::file_manager::*;
    use gcode_timer::{KinematicLimits, TimerError};
    use std::fs as stdfs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const PROGRAM: &str = "G28\nG1 X50 F3000\nG1 Y50\nG1 X0 Y0 E5 F1200\n";

    #[test]
    fn test_timed_output_path() {
        assert_eq!(
            timed_output_path(Path::new("part.gcode")),
            PathBuf::from("part.timed.gcode")
        );
        assert_eq!(
            timed_output_path(Path::new("dir.v2/part")),
            PathBuf::from("dir.v2/part.timed")
        );
        assert_eq!(
            timed_output_path(Path::new("/tmp/a.b.gco")),
            PathBuf::from("/tmp/a.b.timed.gco")
        );
    }

    #[test]
    fn test_estimate_and_annotate_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("part.gcode");
        stdfs::write(&input, PROGRAM).unwrap();

        let limits = KinematicLimits::default();
        let files = FileManager::new(&limits);
        let total = files.estimate(&input).unwrap();
        assert!(total > 0.0);

        let output = timed_output_path(&input);
        files
            .annotate(&input, &OutputTarget::File(output.clone()), total)
            .unwrap();
        let written = stdfs::read_to_string(&output).unwrap();
        assert!(written.starts_with("; ---\n"));
        assert!(written.contains("M117 TTL "));
        assert!(written.contains("G1 X0 Y0 E5 F1200\n"));
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let limits = KinematicLimits::default();
        let files = FileManager::new(&limits);
        let result = files.estimate(Path::new("does/not/exist.gcode"));
        assert!(matches!(result, Err(TimerError::Read { .. })));
    }

    #[test]
    fn test_unwritable_output_is_write_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("part.gcode");
        stdfs::write(&input, PROGRAM).unwrap();
        let limits = KinematicLimits::default();
        let files = FileManager::new(&limits);
        let target = OutputTarget::File(dir.path().join("missing_dir").join("out.gcode"));
        let result = files.annotate(&input, &target, 1.0);
        assert!(matches!(result, Err(TimerError::Write { .. })));
    }

    #[test]
    fn test_cli_output_target_selection() {
        let cli = Cli::try_parse_from(["gcode-timer", "a.gcode"]).unwrap();
        assert_eq!(
            cli.output_target(Path::new("a.gcode")),
            OutputTarget::File(PathBuf::from("a.timed.gcode"))
        );

        let cli = Cli::try_parse_from(["gcode-timer", "-o", "out.gcode", "a.gcode"]).unwrap();
        assert_eq!(
            cli.output_target(Path::new("a.gcode")),
            OutputTarget::File(PathBuf::from("out.gcode"))
        );

        let cli = Cli::try_parse_from(["gcode-timer", "-s", "-o", "x", "a.gcode"]).unwrap();
        assert_eq!(cli.output_target(Path::new("a.gcode")), OutputTarget::Stdout);
    }

    #[test]
    fn test_cli_usage_rules() {
        assert!(Cli::try_parse_from(["gcode-timer"]).is_err());
        assert!(Cli::try_parse_from(["gcode-timer", "--create-config", "a.gcode"]).is_err());
        assert!(Cli::try_parse_from(["gcode-timer", "--create-config"]).is_ok());

        let cli = Cli::try_parse_from(["gcode-timer", "-s", "a.gcode", "b.gcode"]).unwrap();
        assert!(matches!(cli.validate(), Err(TimerError::Usage(_))));
        let cli = Cli::try_parse_from(["gcode-timer", "-o", "x", "a.gcode", "b.gcode"]).unwrap();
        assert!(matches!(cli.validate(), Err(TimerError::Usage(_))));
        let cli = Cli::try_parse_from(["gcode-timer", "-i", "a.gcode", "b.gcode"]).unwrap();
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_run_writes_timed_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.gcode");
        let b = dir.path().join("b.gcode");
        stdfs::write(&a, PROGRAM).unwrap();
        stdfs::write(&b, "G1 X10 F600\n").unwrap();
        let config = dir.path().join("timer.toml");

        let cli = Cli::try_parse_from([
            "gcode-timer",
            "-c",
            config.to_str().unwrap(),
            a.to_str().unwrap(),
            b.to_str().unwrap(),
        ])
        .unwrap();
        run(&cli).unwrap();

        assert!(dir.path().join("a.timed.gcode").exists());
        let b_out = stdfs::read_to_string(dir.path().join("b.timed.gcode")).unwrap();
        assert!(b_out.contains("M117 TTL 00h00m01s"));
        assert!(b_out.ends_with("G1 X10 F600\nM117 ETR 00h00m00s\n"));
    }

    #[test]
    fn test_run_create_config() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("conf").join("timer.toml");
        let cli = Cli::try_parse_from([
            "gcode-timer",
            "--create-config",
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();
        run(&cli).unwrap();
        let written = stdfs::read_to_string(&config).unwrap();
        assert!(written.contains("[max_jerk]"));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.gcode");
        stdfs::write(&input, PROGRAM).unwrap();
        let config = dir.path().join("timer.toml");
        stdfs::write(&config, "accel_efficiency = 1.5\n").unwrap();
        let cli = Cli::try_parse_from([
            "gcode-timer",
            "-c",
            config.to_str().unwrap(),
            input.to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(run(&cli), Err(TimerError::Config(_))));
        assert!(!dir.path().join("a.timed.gcode").exists());
    }
}

//! Runs the demo pipeline end to end and checks rendered output

use wavegraph::io::cli::{Cli, Demo, DemoRunner};

fn cli(demo: Demo, output: Option<std::path::PathBuf>) -> Cli {
    Cli {
        demo,
        // A seed that solves the Sudoku demo with few restarts
        seed: 7,
        max_resets: 1000,
        width: Some(8),
        height: Some(4),
        quiet: true,
        output,
    }
}

#[test]
fn test_coastline_demo_writes_rendered_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coastline.txt");

    let runner = DemoRunner::new(cli(Demo::Coastline, Some(path.clone())));
    runner.run().unwrap();

    let rendered = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in &lines {
        assert_eq!(line.chars().count(), 8);
        assert!(line.chars().all(|glyph| "~+#".contains(glyph)));
    }
}

#[test]
fn test_sudoku_demo_writes_nine_digit_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sudoku.txt");

    let runner = DemoRunner::new(cli(Demo::Sudoku, Some(path.clone())));
    runner.run().unwrap();

    let rendered = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 9);
    for line in &lines {
        assert_eq!(line.chars().count(), 9);
        assert!(line.chars().all(|glyph| glyph.is_ascii_digit()));
    }
}

#[test]
fn test_output_write_failure_is_reported() {
    let runner = DemoRunner::new(cli(
        Demo::Coastline,
        Some(std::path::PathBuf::from("/nonexistent/dir/out.txt")),
    ));
    assert!(runner.run().is_err());
}

use std::path::PathBuf;

use mtxcut::{default_output_name, ExtractConfig, ThresholdEdgeExtractor};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Pass a CSV path to run on real data; otherwise a three-row sample is used.
    let tmp = tempfile::tempdir()?;
    let input = match std::env::args().nth(1) {
        Some(p) => PathBuf::from(p),
        None => {
            let p = tmp.path().join("abstract_similarities.csv");
            std::fs::write(&p, "x\n0.1,0.5\n0.2,0.9,0.3\n")?;
            p
        }
    };

    let cfg = ExtractConfig { cutoff: 0.4, ..Default::default() };
    let output = tmp.path().join(default_output_name(cfg.cutoff));

    let summary = ThresholdEdgeExtractor::new(cfg)?.run(&input, &output)?;

    print!("{}", std::fs::read_to_string(&output)?);
    println!("done with {} edges", summary.edges);
    Ok(())
}

// demos/csv_pipeline.rs
//
// cargo run --example csv_pipeline -- path/to/data.csv
//
// Without an argument a small passenger-style table is generated.
use logit_etl::backend::Matrix;
use logit_etl::preprocessing::{FittedTransformer, PipelineConfig, StandardizationPipeline};
use logit_etl::trainer::Trainer;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
name,age,fare,survived
Allen,29,211.3,1
Braund,22,7.25,0
Cumings,38,71.28,1
Heikkinen,26,7.92,1
Futrelle,35,53.1,1
Moran,unknown,,0
McCarthy,54,51.86,0
Palsson,2,21.07,0
Johnson,27,11.13,1
Nasser,14,30.07,1
Saundercock,20,8.05,0
Andersson,39,31.27,0
Vestrom,14,7.85,0
Rice,2,29.12,0
Williams,,,1
Fortune,19,263.0,0
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let workdir = tempfile::tempdir()?;
    let source = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let path = workdir.path().join("passengers.csv");
            fs::write(&path, SAMPLE)?;
            path
        }
    };

    let config = PipelineConfig::default().with_output_path(workdir.path().join("standardized.csv"));
    let mut pipeline = StandardizationPipeline::new(config);

    let summary = pipeline.extract_and_transform(&source, true)?;
    println!(
        "rows read={} kept={} dropped={}",
        summary.rows_read, summary.rows_kept, summary.rows_dropped
    );
    for stat in &summary.statistics {
        println!("  {:<8} mean={:>10.4} std={:>10.4}", stat.name, stat.mean, stat.std);
    }

    let dataset = pipeline.load_dataset()?;
    println!("header: {}", pipeline.header().join(","));

    let model = Trainer::builder()
        .learning_rate(0.1)
        .max_epochs(300)
        .seed(7)
        .verbose(false)
        .build()
        .fit(&dataset)?;

    let (x, y) = dataset.to_matrices();
    println!(
        "final loss={:.5} training accuracy={:.3}",
        model.loss(),
        model.accuracy(&x, &y, 0.5)?
    );

    if let Some(scaler) = pipeline.statistics() {
        let raw = [30.0, 50.0];
        let z = scaler.transform_point(&raw);
        let p = model.predict(&Matrix::row_vector(&z))?;
        println!("P(target=1 | {raw:?}) = {:.4}", p.get(0, 0));
    }
    Ok(())
}

// demos/two_clusters.rs
use logit_etl::backend::Matrix;
use logit_etl::preprocessing::{FittedTransformer, Standardizer, Transformer};
use logit_etl::trainer::LogisticRegressionTrainer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // class 0 around (0, 0), class 1 around (5, 5)
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.8)?;
    let mut points = Vec::new();
    let mut labels = Vec::new();
    for (center, label) in [(0.0, 0.0), (5.0, 1.0)] {
        for _ in 0..100 {
            points.push([center + noise.sample(&mut rng), center + noise.sample(&mut rng)]);
            labels.push(label);
        }
    }

    let scaler = Standardizer::new().fit(&points)?;
    let rows: Vec<Vec<f64>> = points
        .iter()
        .map(|p| scaler.transform_point(p).to_vec())
        .collect();
    let x = Matrix::from_rows(&rows)?;
    let y = Matrix::column(&labels);

    let mut trainer = LogisticRegressionTrainer::with_seed(2, 0.1, 42);
    for _ in 0..5 {
        trainer.fit(&x, &y, 100)?;
        println!(
            "epochs={:4} loss={:.5} accuracy={:.3}",
            trainer.loss_history().len(),
            trainer.loss(),
            trainer.accuracy(&x, &y, 0.5)?
        );
    }

    if let Some((slope, intercept)) = trainer.decision_boundary() {
        println!("boundary (standardized): x2 = {slope:.3} * x1 + {intercept:.3}");
    }

    let query = scaler.transform_point(&[2.0, 3.0]);
    let p = trainer.predict(&Matrix::row_vector(&query))?;
    println!("P(class 1 | (2.0, 3.0)) = {:.4}", p.get(0, 0));

    println!("{}", trainer.report().to_json()?);
    Ok(())
}

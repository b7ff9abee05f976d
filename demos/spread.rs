use core::error::Error;
use harmony::{
    evaluate,
    network::{connect_isolated_nodes, initialize_network},
    random::default_rng,
    EpochStats, TrainConfig, TrainHooks,
};
use rand_distr::{Distribution, Uniform};

const NODES: usize = 50;
const V_MAX: usize = 5;
const R_HARMONY: f64 = 0.5;

fn report(stats: &EpochStats<'_>) {
    let (lo, hi) = stats
        .weights
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), w| (lo.min(*w), hi.max(*w)));
    println!(
        "epoch {}/{}: weights in [{lo:.3}, {hi:.3}], root {:.3}",
        stats.epoch,
        stats.epochs,
        stats.network.nodes()[0].activation()
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = default_rng();
    let mut network = initialize_network(NODES, V_MAX, R_HARMONY, &mut rng)?;
    let repaired = connect_isolated_nodes(&mut network, &mut rng)?;
    println!(
        "{} nodes, {} connections, {repaired} repaired",
        network.len(),
        network.connection_count()
    );

    // (distance, orientation) pairs, 80/20 train and test
    let dist = Uniform::new(0., 1.)?;
    let data = (0..2000)
        .map(|_| [dist.sample(&mut rng), dist.sample(&mut rng)])
        .collect::<Vec<_>>();
    let (train, test) = data.split_at(1600);

    let config = TrainConfig {
        epochs: 10,
        learning_rate: 0.1,
    };
    let mut hooks = TrainHooks::new(vec![Box::new(report)]);
    config.train_with_hooks(&mut network, train, &mut hooks)?;

    let eval = evaluate(&mut network, test, 0.5)?;
    println!("activated: {:.2}", eval.ratio());

    let strongest = network
        .nodes()
        .iter()
        .enumerate()
        .flat_map(|(i, n)| n.connections().iter().map(move |c| (i, c)))
        .max_by(|(_, l), (_, r)| l.weight.total_cmp(&r.weight));
    if let Some((from, c)) = strongest {
        println!("strongest: #{from} -> {} ({:.3})", c.target, c.weight);
    }
    Ok(())
}

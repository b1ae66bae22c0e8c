//! EV Optimisation CLI - Run NSGA-II from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use ev_optimisation::{NsgaEngine, OptimisationConfig, schema::ResultRow};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [output.json]", args[0]);
        eprintln!();
        eprintln!("Optimise EV range vs. acceleration time with NSGA-II.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to optimisation configuration file");
        eprintln!("  output.json  Optional path for the compact result table");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let output_path = args.get(2).map(PathBuf::from);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: OptimisationConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("EV NSGA-II Optimisation");
    println!("=======================");
    match config.population.size {
        Some(size) => println!("Population: {}", size),
        None => println!("Population: <unset>"),
    }
    println!("Generations: {}", config.population.generations);
    println!("Crossover: {:?}", config.operators.crossover);
    println!(
        "Rates: crossover={}, mutation={}",
        config.operators.crossover_rate, config.operators.mutation_rate
    );
    println!();

    let mut engine = NsgaEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let result = engine
        .run_with_callback(|generation| {
            let best_range = generation
                .objectives
                .iter()
                .map(|o| -o[0])
                .fold(f64::NEG_INFINITY, f64::max);
            let best_time = generation
                .objectives
                .iter()
                .map(|o| o[1])
                .fold(f64::INFINITY, f64::min);
            println!(
                "  Generation {}: fronts={}, pareto={}, best range={:.1} km, best 0-100={:.2} s",
                generation.generation,
                generation.front_count(),
                generation.pareto_front().len(),
                best_range,
                best_time
            );
        })
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    let elapsed = start.elapsed();

    if let Some(last) = result.final_generation() {
        println!();
        println!("Final Pareto front:");
        for row in last.rows().iter().filter(|r| r.front == 1) {
            println!(
                "  {:>6.2} kW  {:>6.2} kWh  {:>8.2} kg  range {:>6.1} km  0-100 {:>5.2} s",
                row.motor_power, row.battery_capacity, row.mass, row.range_km, row.time_s
            );
        }
    }

    println!();
    println!(
        "Time: {:.2}s ({} evaluations)",
        elapsed.as_secs_f32(),
        result.stats.evaluations
    );

    if let Some(path) = output_path {
        let table: Vec<ResultRow> = result.table().iter().map(ResultRow::compact).collect();
        let json = serde_json::to_string(&table).unwrap_or_else(|e| {
            eprintln!("Error serializing result: {}", e);
            std::process::exit(1);
        });
        fs::write(&path, json).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {}", path.display(), e);
            std::process::exit(1);
        });
        println!("Wrote {} rows to {}", table.len(), path.display());
    }
}

fn print_example_config() {
    let config = OptimisationConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}

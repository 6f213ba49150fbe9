#![allow(clippy::collapsible_else_if)]

mod io;
mod parse;

use clap::Parser;

use satplan_core::config::Config;
use satplan_core::problem::ground::ground;
use satplan_core::{encode, plan, solve};

use parse::cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        min_horizon: cli.horizon_min.unwrap_or(config_default().min_horizon),
        max_horizon: cli.horizon_max.unwrap_or(config_default().max_horizon),
        solver: cli.solver.into(),
    };

    let problem = match io::read_problem(&cli.input) {
        Ok(Ok(problem)) => problem,
        Ok(Err(parse_err)) => {
            eprintln!("c error: {parse_err}");
            std::process::exit(1);
        }
        Err(io_err) => {
            eprintln!("c error reading {}: {io_err}", cli.input.display());
            std::process::exit(1);
        }
    };

    let grounded = ground(&problem);

    let mut last_encoding = None;
    for horizon in config.min_horizon..=config.max_horizon {
        log::info!("trying horizon {horizon}");
        let (table, cnf) = encode::encode(&problem, &grounded, horizon);
        let symbols = table.all_ids();
        let num_vars = table.len();

        match solve::solve(&cnf, &symbols, num_vars, config.solver) {
            Some(model) => {
                if let Some(path) = &cli.dimacs {
                    if let Err(e) = write_dimacs_to(path, &cnf, num_vars, &cli.input, horizon) {
                        eprintln!("c error writing DIMACS to {}: {e}", path.display());
                    }
                }
                let steps = plan::extract(&table, &model);
                for step in &steps {
                    println!("{step}");
                }
                std::process::exit(0);
            }
            None => {
                log::debug!("horizon {horizon} is UNSAT, trying next horizon");
                last_encoding = Some((horizon, num_vars, cnf));
                continue;
            }
        }
    }

    if let Some(path) = &cli.dimacs {
        if let Some((horizon, num_vars, cnf)) = last_encoding {
            if let Err(e) = write_dimacs_to(path, &cnf, num_vars, &cli.input, horizon) {
                eprintln!("c error writing DIMACS to {}: {e}", path.display());
            }
        }
    }

    let exhausted = satplan_core::types::err::HorizonExhausted {
        max_horizon: config.max_horizon,
    };
    eprintln!("c {exhausted}");
    std::process::exit(2);
}

fn write_dimacs_to(
    path: &std::path::Path,
    cnf: &encode::Cnf,
    num_vars: usize,
    source: &std::path::Path,
    horizon: u32,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    io::write_dimacs(&mut file, cnf, num_vars, source, horizon)
}

fn config_default() -> Config {
    Config::default()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

use motifsketch::cli::io::{read_input_map, write_rows};
use motifsketch::cli::opts::{CaseArg, Cli};
use motifsketch::cli::report::{format_batch_plan, print_warnings};
use motifsketch::{
    detect_case, enrich, enrich_partitioned, plan_batch, BatchPolicy, Case, MotifParams,
    PartitionParams, Row, RowSchema,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn run() -> Result<()> {
    let start_time = Instant::now();
    let opt = Cli::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.n_threads)
        .build_global()
        .context("building Rayon thread pool")?;

    let requested_case = match opt.case {
        CaseArg::Ordinary => Case::Ordinary,
        CaseArg::Convolution => Case::Convolution,
    };

    println!("Start: Loading input map");
    let map = read_input_map(&opt.input, requested_case)?;
    let case = detect_case(&map).context("detecting case from input map")?;
    if case != requested_case {
        eprintln!(
            "warning: --case {:?} requested but the input map's first non-empty sequence looks like {:?}; proceeding with {:?} as detected",
            requested_case, case, case
        );
    }

    let batch_policy = match opt.batch_size {
        Some(n) => BatchPolicy::Fixed(n),
        None => BatchPolicy::Auto,
    };

    let motif = MotifParams {
        k: opt.k,
        case,
        filter_len: opt.filter_len,
        delta: opt.delta,
        epsilon: opt.epsilon,
        min_count: opt.min_count,
        batch_policy,
        safety_factor: opt.safety_factor,
        min_batch: opt.min_batch,
        max_batch: opt.max_batch,
        seed: opt.seed,
        use_accel: true,
    };

    let total_points = map.values().filter(|s| !s.is_empty()).count();
    let l = map.values().map(|s| s.len()).max().unwrap_or(0);
    if let Ok(plan) = plan_batch(
        total_points,
        l,
        motif.k,
        motif.case,
        None,
        motif.safety_factor,
        motif.min_batch,
        motif.max_batch,
        motif.delta,
        motif.epsilon,
    ) {
        println!("Planned batches: {}", format_batch_plan(&plan));
    }

    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("       {bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    let k = motif.k;
    let rows: Vec<Row> = if opt.partitioned {
        println!("Start: Sketching (partitioned)");
        let params = PartitionParams {
            motif,
            partition_width: opt.partition_width,
        };
        let result = enrich_partitioned(&map, &params)?;
        print_warnings(&result.warnings);
        pb.finish_with_message("| Finished sketching");
        result.rows
    } else {
        println!("Start: Sketching");
        let rows = enrich(&map, &motif)?;
        pb.finish_with_message("| Finished sketching");
        rows
    };

    println!("Start: Writing rows");
    let schema = match case {
        Case::Ordinary => RowSchema::Ordinary { k },
        Case::Convolution => RowSchema::Convolution { k },
    };
    write_rows(&opt.output, schema, &rows)?;

    let elapsed = start_time.elapsed();
    println!("Wrote {} rows. Elapsed time: {:.2?}", rows.len(), elapsed);
    Ok(())
}

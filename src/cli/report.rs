use motifsketch::BatchPlan;

/// Renders a byte count as whole-number bytes, MB, or GB, whichever reads
/// most naturally.
pub fn format_bytes(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = MB * 1024.0;
    let b = bytes as f64;
    if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else {
        format!("{bytes} B")
    }
}

/// A human-readable one-line summary of a chosen batch plan, printed by the
/// binary before the sketching pass starts.
pub fn format_batch_plan(plan: &BatchPlan) -> String {
    format!(
        "batch_size={} num_batches={} fixed_mem={} per_point_mem={}B peak_mem={}",
        plan.batch_size,
        plan.num_batches,
        format_bytes(plan.fixed_mem),
        plan.per_point_mem,
        format_bytes(plan.peak_mem),
    )
}

/// Prints any advisory warnings returned alongside a partitioned run, one
/// per line, to stderr.
pub fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}

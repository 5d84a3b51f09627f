use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use dssgen::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pipe-delimited `.tbl` files, dbgen-compatible.
    Tbl,
    /// Comma-delimited `.csv` files.
    Csv,
    /// Batched INSERT statements, spread over a pool of writers.
    Sql,
    /// JSON-lines files.
    Ndjson,
}

/// Configuration settings parsed from command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about = "TPC-H dataset generator", long_about = None)]
struct DbGenConfig {
    /// Scale factor.
    #[arg(short = 's', long, default_value_t = 1)]
    scale_factor: i64,

    /// Tables to generate (comma separated; default all).
    #[arg(short = 'T', long, value_delimiter = ',')]
    tables: Vec<String>,

    /// Output directory.
    #[arg(short = 'o', long, default_value = "data")]
    output_dir: PathBuf,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Tbl)]
    format: OutputFormat,

    /// Contiguous partitions per table, generated by one thread each.
    #[arg(short = 't', long, default_value_t = 1)]
    partitions: usize,

    /// Downstream writers per partition for the sql format.
    #[arg(short = 'c', long, default_value_t = 1)]
    sink_concurrency: usize,

    /// Text pool size in bytes. Smaller pools generate faster but are not
    /// byte-compatible with dbgen output.
    #[arg(long)]
    text_pool_size: Option<usize>,
}

const TABLE_NAMES: [&str; 8] = [
    "part", "partsupp", "supplier", "customer", "orders", "lineitem", "nation", "region",
];

// One generation pass. Master/detail pairs requested together are produced
// in a combined pass so the master's rows are synthesized only once.
#[derive(Debug, Clone, Copy)]
enum Job {
    OrderLine,
    PartPsupp,
    Single(Table),
}

impl Job {
    fn table(self) -> Table {
        match self {
            Job::OrderLine => Table::OrderLine,
            Job::PartPsupp => Table::PartPsupp,
            Job::Single(table) => table,
        }
    }
}

fn plan_jobs(requested: &BTreeSet<String>) -> Vec<Job> {
    let has = |name: &str| requested.contains(name);
    let mut jobs = Vec::new();
    match (has("part"), has("partsupp")) {
        (true, true) => jobs.push(Job::PartPsupp),
        (true, false) => jobs.push(Job::Single(Table::Part)),
        (false, true) => jobs.push(Job::Single(Table::PartSupp)),
        (false, false) => {}
    }
    if has("supplier") {
        jobs.push(Job::Single(Table::Supplier));
    }
    if has("customer") {
        jobs.push(Job::Single(Table::Customer));
    }
    match (has("orders"), has("lineitem")) {
        (true, true) => jobs.push(Job::OrderLine),
        (true, false) => jobs.push(Job::Single(Table::Orders)),
        (false, true) => jobs.push(Job::Single(Table::Lineitem)),
        (false, false) => {}
    }
    if has("nation") {
        jobs.push(Job::Single(Table::Nation));
    }
    if has("region") {
        jobs.push(Job::Single(Table::Region));
    }
    jobs
}

fn partition_range(total: i64, partitions: usize, idx: usize) -> (i64, i64) {
    let p = partitions as i64;
    let i = idx as i64;
    let start = i * total / p + 1;
    let end = (i + 1) * total / p;
    (start, end - start + 1)
}

fn output_path(
    cfg: &DbGenConfig,
    base: &str,
    ext: &str,
    partition: usize,
    writer: Option<usize>,
) -> PathBuf {
    let mut name = format!("{}.{}", base, ext);
    if cfg.partitions > 1 {
        name.push_str(&format!(".{}", partition + 1));
    }
    if let Some(w) = writer {
        name.push_str(&format!(".{}", w + 1));
    }
    cfg.output_dir.join(name)
}

fn make_sink(
    cfg: &DbGenConfig,
    table: &str,
    columns: &[&str],
    partition: usize,
) -> Result<Box<dyn Sink>, SinkError> {
    match cfg.format {
        OutputFormat::Tbl => {
            let file = File::create(output_path(cfg, table, "tbl", partition, None))?;
            Ok(Box::new(CsvSink::tbl(file)))
        }
        OutputFormat::Csv => {
            let file = File::create(output_path(cfg, table, "csv", partition, None))?;
            Ok(Box::new(CsvSink::new(file)))
        }
        OutputFormat::Ndjson => {
            let file = File::create(output_path(cfg, table, "ndjson", partition, None))?;
            Ok(Box::new(NdjsonSink::new(file, columns)))
        }
        OutputFormat::Sql => {
            // One statement file per downstream writer, fed through the
            // fan-out sink the way a pool of batch-insert connections is.
            let concurrency = cfg.sink_concurrency.max(1);
            let mut files: Vec<Option<File>> = (0..concurrency)
                .map(|w| {
                    let writer = if concurrency > 1 { Some(w) } else { None };
                    File::create(output_path(cfg, table, "sql", partition, writer)).map(Some)
                })
                .collect::<Result<_, _>>()?;
            let table = table.to_string();
            let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
            Ok(Box::new(ConcurrentSink::with_sinks(
                move |idx| {
                    let column_refs: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
                    SqlBatchSink::new(
                        files[idx].take().expect("downstream built twice"),
                        &table,
                        &column_refs,
                    )
                },
                concurrency,
            )))
        }
    }
}

fn build_loader(
    cfg: &DbGenConfig,
    job: Job,
    partition: usize,
) -> Result<Box<dyn RowLoader>, SinkError> {
    let loader: Box<dyn RowLoader> = match job {
        Job::OrderLine => Box::new(OrderLineLoader::new(
            make_sink(cfg, "orders", ORDERS_COLUMNS, partition)?,
            make_sink(cfg, "lineitem", LINEITEM_COLUMNS, partition)?,
        )),
        Job::PartPsupp => Box::new(PartPsuppLoader::new(
            make_sink(cfg, "part", PART_COLUMNS, partition)?,
            make_sink(cfg, "partsupp", PARTSUPP_COLUMNS, partition)?,
        )),
        Job::Single(Table::Part) => Box::new(PartLoader::new(
            make_sink(cfg, "part", PART_COLUMNS, partition)?,
        )),
        Job::Single(Table::PartSupp) => Box::new(PartSuppLoader::new(
            make_sink(cfg, "partsupp", PARTSUPP_COLUMNS, partition)?,
        )),
        Job::Single(Table::Supplier) => Box::new(SupplierLoader::new(
            make_sink(cfg, "supplier", SUPPLIER_COLUMNS, partition)?,
        )),
        Job::Single(Table::Customer) => Box::new(CustomerLoader::new(
            make_sink(cfg, "customer", CUSTOMER_COLUMNS, partition)?,
        )),
        Job::Single(Table::Orders) => Box::new(OrderLoader::new(
            make_sink(cfg, "orders", ORDERS_COLUMNS, partition)?,
        )),
        Job::Single(Table::Lineitem) => Box::new(LineitemLoader::new(
            make_sink(cfg, "lineitem", LINEITEM_COLUMNS, partition)?,
        )),
        Job::Single(Table::Nation) => Box::new(NationLoader::new(
            make_sink(cfg, "nation", NATION_COLUMNS, partition)?,
        )),
        Job::Single(Table::Region) => Box::new(RegionLoader::new(
            make_sink(cfg, "region", REGION_COLUMNS, partition)?,
        )),
        Job::Single(other) => panic!("no single-table job for {}", other.name()),
    };
    Ok(loader)
}

fn run_partition(
    cfg: &DbGenConfig,
    job: Job,
    partition: usize,
    dists: Arc<Distributions>,
    pool: Arc<TextPool>,
) -> Result<(), SinkError> {
    let table = job.table();
    let (start, count) = partition_range(table.row_count(cfg.scale_factor), cfg.partitions, partition);
    let mut loader = build_loader(cfg, job, partition)?;
    let generator = Generator::new(cfg.scale_factor, dists, pool);
    for row in generator.rows(table, start, count) {
        loader.load(&row)?;
    }
    loader.flush()?;
    loader.close()
}

fn main() {
    let cfg = DbGenConfig::parse();

    let requested: BTreeSet<String> = if cfg.tables.is_empty() {
        TABLE_NAMES.iter().map(|t| t.to_string()).collect()
    } else {
        cfg.tables.iter().map(|t| t.to_lowercase()).collect()
    };
    for name in &requested {
        if !TABLE_NAMES.contains(&name.as_str()) {
            eprintln!("unknown table {:?}, expected one of {:?}", name, TABLE_NAMES);
            std::process::exit(2);
        }
    }
    if cfg.partitions == 0 {
        eprintln!("at least one partition is required");
        std::process::exit(2);
    }

    if let Err(e) = fs::create_dir_all(&cfg.output_dir) {
        eprintln!("cannot create {}: {}", cfg.output_dir.display(), e);
        std::process::exit(1);
    }

    let dists = shared_distributions();
    let pool = match cfg.text_pool_size {
        Some(size) => {
            println!("building {} byte text pool", size);
            Arc::new(TextPool::build(size, &dists))
        }
        None => {
            println!("building reference text pool ({} bytes)", TEXT_POOL_SIZE);
            reference_pool()
        }
    };

    for job in plan_jobs(&requested) {
        let table = job.table();
        println!(
            "generating {} ({} rows, {} partitions)",
            table.name(),
            table.row_count(cfg.scale_factor),
            cfg.partitions,
        );
        let started = Instant::now();
        let result: Result<(), SinkError> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..cfg.partitions)
                .map(|p| {
                    let dists = Arc::clone(&dists);
                    let pool = Arc::clone(&pool);
                    let cfg = &cfg;
                    s.spawn(move || run_partition(cfg, job, p, dists, pool))
                })
                .collect();
            let mut result = Ok(());
            for handle in handles {
                let partition_result = handle.join().expect("partition worker panicked");
                if result.is_ok() {
                    result = partition_result;
                }
            }
            result
        });
        match result {
            Ok(()) => println!("generated {} in {:?}", table.name(), started.elapsed()),
            Err(e) => {
                eprintln!("failed to generate {}: {}", table.name(), e);
                std::process::exit(1);
            }
        }
    }
}

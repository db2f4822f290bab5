#![allow(clippy::print_stdout)]

use memsim::config::{Config, DEFAULT_CONFIG_FILE};
use memsim::error::Result;
use memsim::paging::Policy;
use memsim::simulation::{segment_table, FragmentationReport, SegmentTableDisplay, Simulation};

const RULE: &str = "============================================================";

fn section(title: &str) {
    println!("\n{RULE}\n{title}\n{RULE}");
}

fn main() -> Result<()> {
    let args = clap::command!()
        .name("memsim")
        .about("Paging, page replacement and segmentation simulator")
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path for the simulation, empty for built-in defaults")
                .default_value(DEFAULT_CONFIG_FILE),
        )
        .arg(
            clap::Arg::new("policy")
                .short('p')
                .long("policy")
                .help("Replacement policy to run: fifo, lru, optimal or all")
                .default_value("all"),
        )
        .get_matches();

    let file = args.get_one::<String>("config").map(String::as_str).unwrap_or("");
    let cfg = Config::new(file)?;
    let loglevel = cfg.log_level.parse::<log::LevelFilter>()?;
    env_logger::Builder::new()
        .filter_level(loglevel)
        .parse_default_env()
        .try_init()?;

    let policies = match args.get_one::<String>("policy").map(String::as_str) {
        None | Some("all") => Policy::ALL.to_vec(),
        Some(name) => vec![name.parse::<Policy>()?],
    };

    println!("{RULE}\nMemory Management Simulator Demo\n{RULE}");

    let sim = Simulation::from_config(&cfg)?;
    for (i, policy) in policies.iter().enumerate() {
        section(&format!("{}. {} Page Replacement", i + 1, policy));
        print!("{}", sim.run_policy(*policy)?);
    }

    let mut step = policies.len() + 1;
    if policies.len() > 1 {
        section(&format!("{step}. Algorithm Comparison"));
        print!("{}", sim.compare()?);
        step += 1;
    }

    section(&format!("{step}. Segmentation"));
    print!("{}", SegmentTableDisplay(&segment_table(&cfg)?));
    step += 1;

    section(&format!("{step}. Virtual Memory (Demand Paging, {})", cfg.policy));
    let demand = Simulation::demand_from_config(&cfg)?.run_policy(cfg.policy)?;
    println!("Virtual Memory Demand Paging Requests: {}", demand.requests);
    print!("{demand}");
    step += 1;

    section(&format!("{step}. Internal Fragmentation"));
    print!("{}", FragmentationReport::from_config(&cfg)?);

    println!("\n{RULE}\nDemo Complete!\n{RULE}");
    Ok(())
}

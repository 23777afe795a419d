use bf_control::{ControlEngine, ControlLaw};
use bf_model::{seed, PlantState};
use bf_runtime::{run_lockstep, PlantRuntime, RuntimeConfig};
use bf_sim::VirtualFermenter;
use bf_store::{LogSink, Store};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "Brewflow CLI - brewing plant control and simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a plant file
    Validate {
        /// Path to the plant YAML file
        plant_path: PathBuf,
    },
    /// Summarize a plant (the built-in demo plant by default)
    Show {
        /// Path to a plant YAML file
        #[arg(long)]
        plant: Option<PathBuf>,
    },
    /// Write the demo plant as YAML for editing
    Export {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the live plant: telemetry and control tickers over the store
    Run {
        /// Path to a plant YAML file
        #[arg(long)]
        plant: Option<PathBuf>,
        /// How long to run, in seconds
        #[arg(long, default_value_t = 30)]
        duration: u64,
        /// Telemetry period in seconds
        #[arg(long, default_value_t = 5)]
        telemetry_period: u64,
        /// Control period in seconds
        #[arg(long, default_value_t = 2)]
        control_period: u64,
        /// Control law
        #[arg(long, value_enum, default_value = "step")]
        law: LawArg,
        /// Drift seed for reproducible telemetry
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run deterministic lockstep ticks (drift then control) and report
    Tick {
        /// Path to a plant YAML file
        #[arg(long)]
        plant: Option<PathBuf>,
        /// Number of lockstep ticks
        #[arg(long, default_value_t = 10)]
        ticks: usize,
        /// Control law
        #[arg(long, value_enum, default_value = "step")]
        law: LawArg,
        /// Drift seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Print the full final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Step a bank of virtual fermenters and print their telemetry
    Ferment {
        /// Number of fermenters
        #[arg(long, default_value_t = 4)]
        count: usize,
        /// Seconds of fermentation advanced per step
        #[arg(long, default_value_t = 3.0)]
        interval: f64,
        /// Number of steps to print
        #[arg(long, default_value_t = 20)]
        steps: usize,
        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LawArg {
    /// Fixed per-tick proportional step (plant default)
    Step,
    /// Full three-term PID on the controller gains
    Pid,
}

impl From<LawArg> for ControlLaw {
    fn from(arg: LawArg) -> Self {
        match arg {
            LawArg::Step => ControlLaw::StepProportional,
            LawArg::Pid => ControlLaw::FullPid,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { plant_path } => cmd_validate(&plant_path),
        Commands::Show { plant } => cmd_show(plant.as_deref()),
        Commands::Export { output } => cmd_export(output.as_deref()),
        Commands::Run {
            plant,
            duration,
            telemetry_period,
            control_period,
            law,
            seed,
        } => cmd_run(
            plant.as_deref(),
            duration,
            telemetry_period,
            control_period,
            law.into(),
            seed,
        ),
        Commands::Tick {
            plant,
            ticks,
            law,
            seed,
            json,
        } => cmd_tick(plant.as_deref(), ticks, law.into(), seed, json),
        Commands::Ferment {
            count,
            interval,
            steps,
            seed,
        } => cmd_ferment(count, interval, steps, seed),
    }
}

fn load_state(plant: Option<&std::path::Path>) -> Result<PlantState, Box<dyn Error>> {
    match plant {
        Some(path) => Ok(bf_plant::load_plant(path)?),
        None => Ok(seed::demo_plant(Utc::now())),
    }
}

fn cmd_validate(plant_path: &std::path::Path) -> Result<(), Box<dyn Error>> {
    let state = bf_plant::load_plant(plant_path)?;
    println!(
        "OK: {} devices, {} vessels, {} controllers, {} processes",
        state.devices.len(),
        state.vessels.len(),
        state.pid_controllers.len(),
        state.processes.len()
    );
    Ok(())
}

fn cmd_show(plant: Option<&std::path::Path>) -> Result<(), Box<dyn Error>> {
    let state = load_state(plant)?;

    println!("Vessels:");
    for vessel in &state.vessels {
        let fill = vessel
            .current_volume
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<16} {:>5}/{:<5} L  {:>6.1} -> {:<6.1} °C",
            vessel.id, fill, vessel.volume, vessel.temperature.current, vessel.temperature.target
        );
    }

    println!("Control loops:");
    for controller in &state.pid_controllers {
        println!(
            "  {:<18} {}  sp={:<6.1} pv={:<6.1} out={:>5.1}%",
            controller.id,
            if controller.enabled { "on " } else { "off" },
            controller.setpoint,
            controller.current_value,
            controller.output
        );
    }

    println!("Sensors:");
    for sensor in state.sensors() {
        println!(
            "  {:<18} {:>8.3} {:<4} ({:?})",
            sensor.id, sensor.value, sensor.unit, sensor.status
        );
    }

    let open_alarms = state.unacknowledged_alarms().count();
    println!(
        "Alarms: {} open / {} total, MQTT {}",
        open_alarms,
        state.alarms.len(),
        if state.mqtt_connected {
            "connected"
        } else {
            "disconnected"
        }
    );
    Ok(())
}

fn cmd_export(output: Option<&std::path::Path>) -> Result<(), Box<dyn Error>> {
    let state = seed::demo_plant(Utc::now());
    match output {
        Some(path) => {
            bf_plant::save_plant(path, &state)?;
            println!("Wrote demo plant to {}", path.display());
        }
        None => {
            let yaml = serde_yaml::to_string(&state)?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn cmd_run(
    plant: Option<&std::path::Path>,
    duration_s: u64,
    telemetry_period_s: u64,
    control_period_s: u64,
    law: ControlLaw,
    seed: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let state = load_state(plant)?;
    let config = RuntimeConfig {
        telemetry_period: Duration::from_secs(telemetry_period_s),
        control_period: Duration::from_secs(control_period_s),
        law,
        drift_seed: seed,
    };

    println!("Running for {duration_s}s (telemetry {telemetry_period_s}s, control {control_period_s}s)...");
    let runtime = PlantRuntime::start(state, Box::new(LogSink), config)?;
    std::thread::sleep(Duration::from_secs(duration_s));

    let (telemetry_ticks, control_ticks) = runtime.tick_counts();
    let final_state = runtime.stop();

    println!("Stopped after {telemetry_ticks} telemetry / {control_ticks} control ticks.");
    print_loop_table(&final_state);
    Ok(())
}

fn cmd_tick(
    plant: Option<&std::path::Path>,
    ticks: usize,
    law: ControlLaw,
    seed: u64,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let state = load_state(plant)?;
    let mut store = Store::with_drift_seed(state, Box::new(LogSink), seed);
    let mut engine = ControlEngine::new(law, 2.0)?;

    run_lockstep(&mut store, &mut engine, ticks)?;
    let final_state = store.into_state();

    if json {
        println!("{}", serde_json::to_string_pretty(&final_state)?);
    } else {
        println!("After {ticks} lockstep ticks (seed {seed}):");
        print_loop_table(&final_state);
    }
    Ok(())
}

fn cmd_ferment(count: usize, interval: f64, steps: usize, seed: u64) -> Result<(), Box<dyn Error>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut fermenters: Vec<VirtualFermenter> = (1..=count)
        .map(|i| VirtualFermenter::new(format!("FERMENTER_{i}")))
        .collect();

    for _ in 0..steps {
        for fermenter in &mut fermenters {
            fermenter.step(interval, &mut rng);
            for (topic, value) in fermenter.readings() {
                println!("{topic} {value:.3}");
            }
        }
    }
    Ok(())
}

fn print_loop_table(state: &PlantState) {
    for controller in &state.pid_controllers {
        println!(
            "  {:<18} sp={:<6.1} pv={:<6.2} out={:>6.2}%",
            controller.id, controller.setpoint, controller.current_value, controller.output
        );
    }
}

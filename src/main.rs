use bone_angle_meter::{
    BoneAngleMeter, ConfigurationManager, JsonFormatter, LandmarkPositions, MeterConfig, Side, TextFormatter,
};
use log::info;

fn print_usage(program: &str) {
    eprintln!("Usage: {} <landmarks.json> <left|right> [--config <config.json>] [--json]", program);
    eprintln!("   or: {} --list", program);
}

/// Print the catalog with the landmarks each measurement needs
fn list_catalog(meter: &BoneAngleMeter) -> Result<(), Box<dyn std::error::Error>> {
    for info in meter.list_measurements() {
        println!("{} [{}]", info.name, info.id.key());
        println!("  {}", info.description);
        for name in meter.required_landmark_names(info.id)? {
            println!("  - {}", name);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("bone-angle-meter", |s| s.as_str());

    if args.len() == 2 && args[1] == "--list" {
        let meter = BoneAngleMeter::new(MeterConfig::default())?;
        return list_catalog(&meter);
    }

    if args.len() < 3 {
        print_usage(program);
        return Err("Invalid arguments".into());
    }

    let landmarks_path = &args[1];
    let side: Side = args[2].parse()?;

    let mut config = MeterConfig::default();
    let mut json_output = false;
    let mut rest = args[3..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => json_output = true,
            "--config" => {
                let path = rest.next().ok_or("--config needs a file path")?;
                config = ConfigurationManager::from_file(path)?.config().clone();
                info!("Loaded configuration from {}", path);
            }
            other => {
                print_usage(program);
                return Err(format!("Unknown argument '{}'", other).into());
            }
        }
    }

    let json_data = std::fs::read_to_string(landmarks_path)?;
    let positions: LandmarkPositions = serde_json::from_str(&json_data)?;
    info!("Loaded {} landmarks from {}", positions.len(), landmarks_path);

    let meter = BoneAngleMeter::new(config)?;
    let report = meter.evaluate_all(&positions, side);

    if json_output {
        println!("{}", JsonFormatter::from_config(&meter.config().output).format_report(&report)?);
    } else {
        print!("{}", TextFormatter::from_config(&meter.config().output).format_report(&report));
    }

    Ok(())
}

use mmck_sim::aggregate;
use mmck_sim::cli::{self, FormatArg};
use mmck_sim::config;
use mmck_sim::error::Result;
use mmck_sim::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args()?;
    let (config, format) = config::build_config(args)?;
    let result = aggregate::run_simulation(&config)?;

    let formatter = formatter_for(&format);
    let output = formatter.write(&result);
    print!("{}", output);

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}

use std::{
    borrow::Cow,
    fs,
    io::{self, stdin},
    path::PathBuf,
    process::exit,
};

use clap::{Args, Parser, Subcommand};
use console::style;
use phone_bill::{
    call_log,
    pricer::{PricedCall, Pricer, Report},
    types::time::TIMESTAMP_FORMAT,
};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use crate::{error::Error, Result};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) {
        if let Err(err) = self.command.run() {
            eprintln!("{err}");
            exit(1);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate the total of the bill for a call log.
    ///
    /// All calls to the number with the highest total cost are free and not part of the total.
    Total(Total),
    /// Analyze a call log.
    ///
    /// This command will show you a breakdown of the cost of every call.
    Analyze(Analyze),
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Total(args) => args.run(),
            Self::Analyze(args) => args.run(),
        }
    }
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// A path to the call log, one `number,start,end` call per line.
    ///
    /// If no path is provided the log is read from standard in.
    #[arg(short = 'l', long)]
    log: Option<PathBuf>,
}

impl LogArgs {
    fn log_name(&self) -> Cow<'_, str> {
        self.log.as_ref().map_or("<stdin>".into(), |path| {
            path.file_name()
                .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
        })
    }

    fn read(&self) -> Result<String> {
        if let Some(path) = &self.log {
            fs::read_to_string(path).map_err(|e| Error::file(path.clone(), e))
        } else {
            io::read_to_string(stdin().lock()).map_err(Error::Stdin)
        }
    }

    fn load_report(&self) -> Result<Report> {
        let log = self.read()?;
        let calls = call_log::parse(&log).map_err(Error::Internal)?;

        info!(log = %self.log_name(), calls = calls.len(), "pricing call log");

        Pricer::new(&calls).build_report().map_err(Error::Internal)
    }
}

#[derive(Debug, Parser)]
pub struct Total {
    #[command(flatten)]
    args: LogArgs,
}

impl Total {
    fn run(self) -> Result<()> {
        let log = self.args.read()?;
        let total = phone_bill::calculate(&log).map_err(Error::Internal)?;

        println!("{total}");

        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Analyze {
    #[command(flatten)]
    args: LogArgs,
    /// Print the full report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct CallRow {
    line: usize,
    number: String,
    start: String,
    end: String,
    duration: String,
    #[tabled(rename = "main min.")]
    in_tariff_minutes: String,
    #[tabled(rename = "off min.")]
    off_tariff_minutes: String,
    discount: String,
    cost: String,
}

impl CallRow {
    fn new(call: &PricedCall) -> Self {
        Self {
            line: call.record.line,
            number: call.record.number.clone(),
            start: call.record.start.format(TIMESTAMP_FORMAT).to_string(),
            end: call.record.end.format(TIMESTAMP_FORMAT).to_string(),
            duration: call.record.duration().to_string(),
            in_tariff_minutes: call.price.in_tariff_minutes.to_string(),
            off_tariff_minutes: call.price.off_tariff_minutes.to_string(),
            discount: call.price.discount.to_string(),
            cost: call.total_cost().to_string(),
        }
    }

    fn free(self) -> Self {
        Self {
            number: style(self.number).dim().to_string(),
            cost: style(format!("{} (free)", self.cost)).dim().to_string(),
            ..self
        }
    }
}

impl Analyze {
    fn run(self) -> Result<()> {
        let report = self.args.load_report()?;

        if self.json {
            let json = serde_json::to_string_pretty(&report).map_err(Error::Serialize)?;
            println!("{json}");
            return Ok(());
        }

        println!(
            "{} `{}`",
            style("Analyzing").green(),
            self.args.log_name()
        );

        let rows = report.calls.iter().map(|call| {
            let row = CallRow::new(call);

            if report.is_free(call) {
                row.free()
            } else {
                row
            }
        });

        println!("{}", Table::new(rows).with(Style::modern()));

        println!(
            "{} {} ({})",
            style("Free number:").bold(),
            report.free_number,
            report.free_cost
        );
        println!("{} {}", style("Total:").bold(), report.total_cost);

        Ok(())
    }
}

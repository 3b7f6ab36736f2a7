use caredesk_core::config::{data_file_from_env_value, step_minutes_from_env_value};
use caredesk_core::constants::DEFAULT_VITALS_HOURS;
use caredesk_core::services::lookup_steps;
use caredesk_core::vitals::{assess, Seed, SeriesGenerator, VitalsReport};
use caredesk_core::{
    CoreConfig, CoreResult, DashboardService, JsonFileStore, MemoryStore, NewPatient, Records,
    WalletService,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "caredesk")]
#[command(about = "CareDesk demo backend CLI")]
struct Cli {
    /// JSON record store (defaults to $CAREDESK_DATA_FILE, then data.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Use an in-memory store seeded with demo records; nothing is written
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the synthetic vitals series for a patient as JSON
    Vitals {
        /// Patient id
        patient_id: String,
        /// Look-back window in hours
        #[arg(long, default_value_t = DEFAULT_VITALS_HOURS, allow_negative_numbers = true)]
        hours: i64,
        /// Sampling interval in minutes
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i64>,
    },
    /// Print the 24h summary and alerts for a patient as JSON
    Summary {
        /// Patient id
        patient_id: String,
    },
    /// Show the vitals seed derived from a patient id
    Seed {
        /// Patient id
        patient_id: String,
    },
    /// Look up the steps for a civic process
    Steps {
        /// Topic words, e.g. `birth certificate`
        topic: Vec<String>,
    },
    /// List all patients
    Patients,
    /// Admit a patient
    AddPatient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        bed: String,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        mrn: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        risk: Option<i64>,
    },
    /// List notes for a patient
    Notes {
        /// Patient id
        patient_id: String,
    },
    /// Record a note for a patient
    AddNote {
        /// Patient id
        patient_id: String,
        /// Note text
        text: String,
        /// Note author (default: system)
        #[arg(long)]
        author: Option<String>,
    },
    /// Show the emergency profile
    Emergency,
}

fn open_records(cli: &Cli, cfg: &CoreConfig) -> Result<Arc<Records>, Box<dyn std::error::Error>> {
    let records = if cli.ephemeral {
        Records::open(MemoryStore::new())?
    } else {
        Records::open(JsonFileStore::new(cfg.data_file()))?
    };
    Ok(Arc::new(records))
}

/// Summary over the standard window, without touching the record store.
fn vitals_report(cfg: &CoreConfig, patient_id: &str) -> CoreResult<VitalsReport> {
    let series = SeriesGenerator::new(cfg.step_minutes())
        .generate(DEFAULT_VITALS_HOURS, Seed::from_identifier(patient_id))?;
    Ok(assess(&series))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_file = cli
        .data_file
        .clone()
        .unwrap_or_else(|| data_file_from_env_value(std::env::var("CAREDESK_DATA_FILE").ok()));
    let step_minutes = step_minutes_from_env_value(std::env::var("CAREDESK_STEP_MINUTES").ok())?;
    let cfg = Arc::new(CoreConfig::new(data_file, step_minutes)?);

    match &cli.command {
        Some(Commands::Vitals {
            patient_id,
            hours,
            step,
        }) => {
            let generator = SeriesGenerator::new(step.unwrap_or(cfg.step_minutes()));
            match generator.generate(*hours, Seed::from_identifier(patient_id)) {
                Ok(series) => println!("{}", serde_json::to_string_pretty(&series)?),
                Err(e) => eprintln!("Error generating vitals: {}", e),
            }
        }
        Some(Commands::Summary { patient_id }) => {
            match vitals_report(&cfg, patient_id) {
                Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                Err(e) => eprintln!("Error summarising vitals: {}", e),
            }
        }
        Some(Commands::Seed { patient_id }) => {
            let seed = Seed::from_identifier(patient_id);
            if seed.is_entropy() {
                println!("0 (empty id: vitals fall back to clock entropy)");
            } else {
                println!("{}", seed.value());
            }
        }
        Some(Commands::Steps { topic }) => {
            let answer = lookup_steps(&topic.join(" "));
            for (i, step) in answer.steps.iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
        }
        Some(Commands::Patients) => {
            let service = DashboardService::new(cfg.clone(), open_records(&cli, &cfg)?);
            let patients = service.list_patients()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for p in patients {
                    println!(
                        "ID: {}, Name: {}, Bed: {}, MRN: {}, Status: {}, Risk: {}",
                        p.id, p.name, p.bed, p.mrn, p.status, p.risk
                    );
                }
            }
        }
        Some(Commands::AddPatient {
            name,
            bed,
            age,
            mrn,
            status,
            risk,
        }) => {
            let service = DashboardService::new(cfg.clone(), open_records(&cli, &cfg)?);
            let new = NewPatient {
                name: Some(name.clone()),
                bed: Some(bed.clone()),
                age: *age,
                mrn: mrn.clone(),
                status: status.clone(),
                risk: *risk,
            };
            match service.add_patient(new) {
                Ok(p) => println!("Admitted {} with ID: {}", p.name, p.id),
                Err(e) => eprintln!("Error admitting patient: {}", e),
            }
        }
        Some(Commands::Notes { patient_id }) => {
            let service = DashboardService::new(cfg.clone(), open_records(&cli, &cfg)?);
            let notes = service.notes(patient_id)?;
            if notes.is_empty() {
                println!("No notes for {}.", patient_id);
            }
            for note in notes {
                println!("[{}] {}: {}", note.ts, note.author, note.text);
            }
        }
        Some(Commands::AddNote {
            patient_id,
            text,
            author,
        }) => {
            let service = DashboardService::new(cfg.clone(), open_records(&cli, &cfg)?);
            match service.add_note(patient_id, Some(text.clone()), author.clone()) {
                Ok(note) => println!("Recorded note for {} at {}", patient_id, note.ts),
                Err(e) => eprintln!("Error recording note: {}", e),
            }
        }
        Some(Commands::Emergency) => {
            let service = WalletService::new(open_records(&cli, &cfg)?);
            let profile = service.profile()?;
            println!("Name: {}", profile.name);
            println!("ID: {}", profile.id);
            println!("ICE: {}", profile.ice);
            println!("Medical notes: {}", profile.medical_notes);
        }
        None => {
            println!("Use 'caredesk --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitals_hours_defaults_to_standard_window() {
        let cli = Cli::try_parse_from(["caredesk", "vitals", "p001"]).expect("should parse");
        match cli.command {
            Some(Commands::Vitals { hours, step, .. }) => {
                assert_eq!(hours, DEFAULT_VITALS_HOURS);
                assert_eq!(step, None);
            }
            _ => panic!("expected vitals command"),
        }
    }

    #[test]
    fn test_summary_matches_dashboard_summary() {
        let cfg = Arc::new(CoreConfig::default());
        let records = Arc::new(Records::open(MemoryStore::new()).expect("open should succeed"));
        let dashboard = DashboardService::new(cfg.clone(), records);

        let from_cli = vitals_report(&cfg, "p002").expect("report should succeed");
        let from_dashboard = dashboard.summary("p002").expect("summary should succeed");

        assert_eq!(from_cli.summary, from_dashboard.summary);
        assert_eq!(from_cli.alerts, from_dashboard.alerts);
    }
}

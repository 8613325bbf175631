use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use swasthya_core::{
    constants::{DEFAULT_REGISTRY_TIMEOUT_SECS, DEFAULT_REGISTRY_URL},
    CoreConfig, EhrSubmission, MergeOutcome, RecordService,
};

#[derive(Parser)]
#[command(name = "swasthya")]
#[command(about = "Swasthya health record CLI")]
struct Cli {
    /// Directory holding the JSON stores
    #[arg(long, env = "SWASTHYA_DATA_DIR", default_value = swasthya_core::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient with their full history
    Show {
        /// ABHA number of the patient, matched exactly
        abha_number: String,
    },
    /// Record an observation for a patient, creating the patient if needed
    Record {
        /// ABHA number of the patient, matched exactly (surrounding spaces included)
        abha_number: String,
        /// Patient name (only used when the patient is new)
        #[arg(long)]
        name: Option<String>,
        /// Patient gender (only used when the patient is new)
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        problem_name: Option<String>,
        #[arg(long)]
        problem_description: Option<String>,
        /// Blood pressure, free-form (e.g. 120/80)
        #[arg(long)]
        bp: Option<String>,
        /// Temperature, free-form
        #[arg(long)]
        temp: Option<String>,
        /// Observation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Print all survey entries
    Surveys,
    /// Print the vaccination reminders
    Reminders,
    /// Truncate every store to an empty array
    ClearAll,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = CoreConfig::new(
        cli.data_dir,
        DEFAULT_REGISTRY_URL.into(),
        Duration::from_secs(DEFAULT_REGISTRY_TIMEOUT_SECS),
    )?;
    let service = RecordService::new(Arc::new(cfg))?;

    match cli.command {
        Some(Commands::List) => match service.load_ehr() {
            Ok(patients) if patients.is_empty() => println!("No patients found."),
            Ok(patients) => {
                for patient in patients {
                    println!(
                        "ABHA: {}, Name: {}, Gender: {}, Observations: {}",
                        patient.identifier,
                        patient.name_or_unknown(),
                        patient.gender_or_unknown(),
                        patient.diseases.len()
                    );
                }
            }
            Err(e) => eprintln!("Error listing patients: {}", e),
        },
        Some(Commands::Show { abha_number }) => match service.find_patient(&abha_number) {
            Ok(Some(patient)) => println!("{}", serde_json::to_string_pretty(&patient)?),
            Ok(None) => println!("No patient with ABHA number {}", abha_number),
            Err(e) => eprintln!("Error reading patient: {}", e),
        },
        Some(Commands::Record {
            abha_number,
            name,
            gender,
            problem_name,
            problem_description,
            bp,
            temp,
            date,
        }) => {
            let submission = EhrSubmission {
                identifier: Some(abha_number.clone()),
                name,
                gender,
                problem_name,
                problem_description,
                vitals_bp: bp,
                vitals_temp: temp,
                date,
            };
            match service.save_ehr(submission) {
                Ok(MergeOutcome::Created) => println!("Created patient {}", abha_number),
                Ok(MergeOutcome::Appended { observations }) => println!(
                    "Recorded observation {} for patient {}",
                    observations, abha_number
                ),
                Err(e) => eprintln!("Error recording observation: {}", e),
            }
        }
        Some(Commands::Surveys) => match service.load_survey() {
            Ok(surveys) => println!("{}", serde_json::to_string_pretty(&surveys)?),
            Err(e) => eprintln!("Error reading surveys: {}", e),
        },
        Some(Commands::Reminders) => match service.vaccination_reminders() {
            Ok(reminders) => println!("{}", serde_json::to_string_pretty(&reminders)?),
            Err(e) => eprintln!("Error reading reminders: {}", e),
        },
        Some(Commands::ClearAll) => match service.clear_all() {
            Ok(()) => println!("All local data cleared"),
            Err(e) => eprintln!("Error clearing data: {}", e),
        },
        None => {
            println!("Use 'swasthya --help' for commands");
        }
    }

    Ok(())
}

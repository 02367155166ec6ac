use clap::Parser;
use who_to_consult::utils::error::AdvisorError;
use who_to_consult::utils::logger;
use who_to_consult::{
    Advisor, CliConfig, ConfigProvider, EmbeddedDataset, JsonFileDataset, Recommendation, Session,
    TomlConfig, DISCLAIMER,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli.load().unwrap_or_else(|e| {
        logger::init_logger(cli.log_json, cli.log_level());
        exit_with(&e)
    });
    logger::init_logger(config.json_logs(), config.log_level());

    tracing::info!("Starting who-to-consult");
    tracing::debug!("CLI config: {:?}", cli);

    let advisor = build_advisor(&config).unwrap_or_else(|e| exit_with(&e));
    let mut session = Session::new(&advisor);

    if cli.list || cli.search.is_some() {
        session.set_query(cli.search.clone().unwrap_or_default());
        print_matches(&session);
        if cli.symptoms.is_empty() && cli.age_input().is_none() {
            return Ok(());
        }
    }

    for symptom in &cli.symptoms {
        if !session.selection().contains(symptom) {
            session.toggle(symptom);
        }
    }
    session.select_age(cli.age_input());

    if let Some(hint) = session.missing_input_hint() {
        eprintln!("💡 {}", hint);
        std::process::exit(2);
    }

    let result = session.find_specialist().unwrap_or_else(|e| exit_with(&e));
    tracing::info!("✅ Recommendation ready: {}", result.kind());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        if let Some(group) = cli.age_group {
            println!("Age group: {}", group.label());
        }
        print_recommendation(result);
    }

    Ok(())
}

fn build_advisor(config: &TomlConfig) -> who_to_consult::Result<Advisor> {
    match config.dataset_path() {
        Some(path) => Advisor::from_source(&JsonFileDataset::new(path), config),
        None => Advisor::from_source(&EmbeddedDataset, config),
    }
}

fn exit_with(e: &AdvisorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn print_matches(session: &Session) {
    let matches = session.filtered_symptoms();
    match session.search_summary() {
        Some(summary) => println!("{}", summary),
        None => println!("{} available symptoms", matches.len()),
    }
    for symptom in &matches {
        println!("  {}", symptom);
    }
    if matches.is_empty() {
        println!("Try searching for related terms or check your spelling");
    }
    println!();
}

fn print_recommendation(result: &Recommendation) {
    if result.is_emergency() {
        println!("⚠️  Seek Emergency Care");
        println!("{}", result.reason());
    } else {
        println!("Recommended Specialist: {}", result.specialist());
        println!("{}", result.reason());

        if !result.alternatives().is_empty() {
            println!();
            println!("Alternative Specialists:");
            for alternative in result.alternatives() {
                println!("  - {}", alternative);
            }
            println!("These specialists may also be able to help with your symptoms.");
        }
        println!();
        println!("Next Steps:");
    }

    for (number, step) in result.next_steps().iter().enumerate() {
        if result.is_emergency() {
            println!("{}", step);
        } else {
            println!("  {}. {}", number + 1, step);
        }
    }

    println!();
    println!("{}", DISCLAIMER);
}

// src/main.rs
//
// Calculatrice scientifique : point d’entrée CLI
// ----------------------------------------------
// - avec EXPRESSION : une évaluation, résultat formaté (ou réponse JSON), code 1 sur erreur
// - sans EXPRESSION : REPL sur stdin (app::vue)
//
// Réglages : options CLI, sinon variables d’environnement CALC_MODE / CALC_MAX_DEPTH / CALC_LOG.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use serde_json::json;

use calculatrice_sci::app::historique::MemoryHistory;
use calculatrice_sci::app::requete::repondre_evaluation;
use calculatrice_sci::app::{AppCalc, CalculatorService, Reglages};
use calculatrice_sci::noyau::jetons::format_tokens;
use calculatrice_sci::{format_resultat, AngleMode, ErreurCalcul};

#[derive(Parser)]
#[command(
    name = "calculatrice",
    version,
    about = "Calculatrice scientifique (f64, DEG/RAD)",
    after_help = r#"
Variables d’environnement :
  CALC_MODE=DEG|RAD      Mode d’angle par défaut
  CALC_MAX_DEPTH=256     Profondeur d’imbrication maximale
  CALC_LOG=debug         Niveau de journalisation

Exemples :
  calculatrice "2 + 3 * 4"
  calculatrice --mode rad "asin(1)"
  calculatrice --json "sqrt(-1)"
  calculatrice                       # REPL
"#
)]
struct Cli {
    /// Expression à évaluer (absente : REPL)
    expression: Option<String>,

    /// Mode d’angle (DEG par défaut)
    #[arg(long, env = "CALC_MODE")]
    mode: Option<AngleMode>,

    /// Identifiant utilisateur : l’évaluation réussie est historisée
    #[arg(long)]
    user: Option<String>,

    /// Réponse JSON {status, body} au lieu du résultat seul
    #[arg(long)]
    json: bool,

    /// Affiche l’arbre (parenthésé) avant le résultat
    #[arg(long)]
    ast: bool,

    /// Affiche les jetons avant le résultat
    #[arg(long)]
    tokens: bool,

    /// Profondeur d’imbrication maximale (bornée à [1, 256])
    #[arg(long, env = "CALC_MAX_DEPTH")]
    max_depth: Option<usize>,

    #[arg(long, value_enum, env = "CALC_LOG", default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_level(cli.log_level.into())
        .init();

    let mut reglages = Reglages::default();
    if let Some(mode) = cli.mode {
        reglages.set_mode_defaut(mode);
    }
    if let Some(n) = cli.max_depth {
        reglages.set_profondeur_max(n);
    }
    debug!("réglages : {reglages:?}");

    match cli.expression.as_deref() {
        Some(expression) => une_evaluation(&cli, reglages, expression),
        None => {
            info!("REPL, mode {}", reglages.mode_defaut);
            let mut app = AppCalc::new(&reglages);
            app.repl(io::stdin().lock(), io::stdout().lock())
                .context("REPL interrompu")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn une_evaluation(cli: &Cli, reglages: Reglages, expression: &str) -> Result<ExitCode> {
    let mut sortie = io::stdout().lock();

    if cli.tokens || cli.ast {
        if let Err(e) = afficher_etapes(cli, &reglages, expression, &mut sortie)? {
            return echec(cli, &e.to_string());
        }
    }

    let service = CalculatorService::new(MemoryHistory::new(), reglages);

    if cli.json {
        let corps = json!({ "expression": expression, "mode": reglages.mode_defaut }).to_string();
        let reponse = repondre_evaluation(&service, &corps, cli.user.as_deref());
        writeln!(sortie, "{}", serde_json::to_string_pretty(&reponse)?)?;
        return Ok(if reponse.status == 200 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    match service.evaluate(expression, None, cli.user.as_deref()) {
        Ok(r) => {
            writeln!(sortie, "{}", format_resultat(r.result))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => echec(cli, &e.to_string()),
    }
}

/// Jetons et/ou arbre ; l’erreur du noyau est rendue à l’appelant (pas d’E/S ratée).
fn afficher_etapes<W: Write>(
    cli: &Cli,
    reglages: &Reglages,
    expression: &str,
    sortie: &mut W,
) -> io::Result<Result<(), ErreurCalcul>> {
    let moteur = reglages.moteur();

    let jetons = match moteur.tokenize(expression) {
        Ok(j) => j,
        Err(e) => return Ok(Err(e)),
    };
    if cli.tokens {
        writeln!(sortie, "jetons : {}", format_tokens(&jetons))?;
    }

    if cli.ast {
        let arbre = match moteur.parse(&jetons) {
            Ok(a) => a,
            Err(e) => return Ok(Err(e)),
        };
        writeln!(sortie, "arbre  : {arbre}  (profondeur {})", arbre.profondeur())?;
    }
    Ok(Ok(()))
}

fn echec(cli: &Cli, message: &str) -> Result<ExitCode> {
    if cli.json {
        let corps = json!({ "status": 400, "body": { "error": message } });
        println!("{}", serde_json::to_string_pretty(&corps)?);
    } else {
        eprintln!("erreur : {message}");
    }
    Ok(ExitCode::FAILURE)
}

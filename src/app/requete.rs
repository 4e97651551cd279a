// src/app/requete.rs
//
// Charges utiles "à la HTTP" sans serveur : validation + traduction en réponses.
// - POST evaluate : {expression, mode?} -> 200 {result, expression, mode} | 400 {error}
// - GET  history  : {limit?} (1..=100, défaut 50) -> 200 {history: [...]}
// - DELETE history -> 200 {success: true}
//
// Le routage, l’authentification et le transport restent hors de ce crate :
// l’appelant fournit le corps JSON et l’id utilisateur (opaque) déjà résolu.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::historique::HistoryStore;
use crate::app::reglages::{LIMITE_HISTORIQUE_DEFAUT, LIMITE_HISTORIQUE_MAX};
use crate::app::service::{CalculatorService, ErreurService};
use crate::noyau::AngleMode;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EvaluateRequest {
    pub expression: String,
    #[serde(default)]
    pub mode: Option<AngleMode>,
}

impl EvaluateRequest {
    pub fn validate(&self) -> Result<(), ErreurService> {
        if self.expression.is_empty() {
            return Err(ErreurService::Validation("Expression is required".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl HistoryQuery {
    /// Limite validée (entier dans [1, 100]) ou défaut 50.
    pub fn limite(&self) -> Result<usize, ErreurService> {
        match self.limit {
            None => Ok(LIMITE_HISTORIQUE_DEFAUT),
            Some(n) => usize::try_from(n)
                .ok()
                .filter(|n| (1..=LIMITE_HISTORIQUE_MAX).contains(n))
                .ok_or_else(|| {
                    ErreurService::Validation(format!(
                        "limit must be between 1 and {LIMITE_HISTORIQUE_MAX}"
                    ))
                }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reponse {
    pub status: u16,
    pub body: Value,
}

impl Reponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn erreur(e: &ErreurService) -> Self {
        Self {
            status: e.status(),
            body: json!({ "error": e.to_string() }),
        }
    }
}

/// Corps JSON brut -> réponse. Toute erreur du noyau donne 400 avec son message.
pub fn repondre_evaluation<S: HistoryStore>(
    service: &CalculatorService<S>,
    corps: &str,
    user_id: Option<&str>,
) -> Reponse {
    let requete: EvaluateRequest = match serde_json::from_str(corps) {
        Ok(r) => r,
        Err(e) => {
            return Reponse::erreur(&ErreurService::Validation(format!(
                "Invalid request body: {e}"
            )))
        }
    };

    match evaluer_requete(service, &requete, user_id) {
        Ok(body) => Reponse::ok(body),
        Err(e) => Reponse::erreur(&e),
    }
}

fn evaluer_requete<S: HistoryStore>(
    service: &CalculatorService<S>,
    requete: &EvaluateRequest,
    user_id: Option<&str>,
) -> Result<Value, ErreurService> {
    requete.validate()?;
    let r = service.evaluate(&requete.expression, requete.mode, user_id)?;
    Ok(json!({
        "result": r.result,
        "expression": r.expression,
        "mode": r.mode,
    }))
}

pub fn repondre_historique<S: HistoryStore>(
    service: &CalculatorService<S>,
    user_id: &str,
    query: &HistoryQuery,
) -> Reponse {
    let resultat = query
        .limite()
        .and_then(|limite| service.history(user_id, Some(limite)));

    match resultat {
        Ok(history) => Reponse::ok(json!({ "history": history })),
        Err(e) => Reponse::erreur(&e),
    }
}

pub fn repondre_effacement<S: HistoryStore>(
    service: &CalculatorService<S>,
    user_id: &str,
) -> Reponse {
    match service.clear_history(user_id) {
        Ok(_) => Reponse::ok(json!({ "success": true })),
        Err(e) => Reponse::erreur(&e),
    }
}

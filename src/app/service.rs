//! src/app/service.rs
//!
//! Service de calcul : façade du noyau pour les appelants externes.
//!
//! - évalue (mode par défaut : celui des réglages, DEG)
//! - enveloppe le nombre dans un `EvaluationResult` horodaté
//! - persiste dans l’historique SEULEMENT si un utilisateur est fourni, après succès
//!
//! Le noyau reste pur : la journalisation se fait ici.

use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

use crate::app::historique::{ErreurHistorique, HistoryEntry, HistoryStore, NouvelleEntree};
use crate::app::reglages::{Reglages, LIMITE_HISTORIQUE_MAX};
use crate::noyau::{format_resultat, AngleMode, ErreurCalcul};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub result: f64,
    pub expression: String,
    pub mode: AngleMode,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ErreurService {
    /// Erreur du noyau, transmise telle quelle (message d’origine).
    #[error(transparent)]
    Calcul(#[from] ErreurCalcul),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Historique(#[from] ErreurHistorique),
}

impl ErreurService {
    /// Statut HTTP équivalent : faute de l’appelant (400) ou du serveur (500).
    pub fn status(&self) -> u16 {
        match self {
            ErreurService::Calcul(_) | ErreurService::Validation(_) => 400,
            ErreurService::Historique(_) => 500,
        }
    }
}

pub struct CalculatorService<S: HistoryStore> {
    reglages: Reglages,
    depot: S,
}

impl<S: HistoryStore> CalculatorService<S> {
    pub fn new(depot: S, reglages: Reglages) -> Self {
        Self { reglages, depot }
    }

    pub fn reglages(&self) -> &Reglages {
        &self.reglages
    }

    pub fn evaluate(
        &self,
        expression: &str,
        mode: Option<AngleMode>,
        user_id: Option<&str>,
    ) -> Result<EvaluationResult, ErreurService> {
        let mode = mode.unwrap_or(self.reglages.mode_defaut);

        let result = match self.reglages.moteur().evaluate(expression, mode) {
            Ok(v) => v,
            Err(e) => {
                debug!("évaluation refusée ({}): {expression:?} -> {e}", e.famille());
                return Err(e.into());
            }
        };
        debug!("évaluation {expression:?} [{mode}] = {result}");

        if let Some(user_id) = user_id {
            let entree = self.depot.ajouter(NouvelleEntree {
                user_id,
                expression,
                result: format_resultat(result),
                mode,
            })?;
            trace!("historique: entrée #{} pour {user_id}", entree.id);
        }

        Ok(EvaluationResult {
            result,
            expression: expression.to_string(),
            mode,
            timestamp: Utc::now(),
        })
    }

    /// Plus récent d’abord ; `limit` borné à [1, 100], défaut des réglages.
    pub fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<HistoryEntry>, ErreurService> {
        let limite = limit
            .unwrap_or(self.reglages.limite_historique)
            .clamp(1, LIMITE_HISTORIQUE_MAX);
        Ok(self.depot.lister(user_id, limite)?)
    }

    pub fn clear_history(&self, user_id: &str) -> Result<usize, ErreurService> {
        let n = self.depot.effacer(user_id)?;
        debug!("historique effacé pour {user_id}: {n} entrée(s)");
        Ok(n)
    }
}

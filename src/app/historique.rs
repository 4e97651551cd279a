// src/app/historique.rs
//
// Historique persistant des évaluations réussies, par utilisateur (id opaque).
// - Le noyau ne l’appelle jamais : seul le service écrit, après un succès.
// - Lecture : plus récent d’abord, limite appliquée par l’appelant.
// - Implémentation fournie : mémoire (Mutex), suffisante pour la CLI et les tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noyau::AngleMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    pub user_id: String,
    pub expression: String,
    /// Résultat déjà formaté (format_resultat), pas le f64 brut.
    pub result: String,
    pub mode: AngleMode,
    pub created_at: DateTime<Utc>,
}

/// Ce que le service fournit ; l’id et la date sont attribués par le dépôt.
#[derive(Clone, Debug)]
pub struct NouvelleEntree<'a> {
    pub user_id: &'a str,
    pub expression: &'a str,
    pub result: String,
    pub mode: AngleMode,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurHistorique {
    #[error("history store unavailable (poisoned lock)")]
    Verrou,
}

pub trait HistoryStore: Send + Sync {
    fn ajouter(&self, entree: NouvelleEntree<'_>) -> Result<HistoryEntry, ErreurHistorique>;

    /// Entrées de `user_id`, plus récentes d’abord, au plus `limite`.
    fn lister(&self, user_id: &str, limite: usize) -> Result<Vec<HistoryEntry>, ErreurHistorique>;

    /// Retourne le nombre d’entrées supprimées.
    fn effacer(&self, user_id: &str) -> Result<usize, ErreurHistorique>;
}

/* ------------------------ Dépôt mémoire ------------------------ */

#[derive(Default)]
struct Contenu {
    prochain_id: u64,
    // ordre d’insertion = ordre chronologique
    par_utilisateur: HashMap<String, Vec<HistoryEntry>>,
}

#[derive(Default)]
pub struct MemoryHistory {
    contenu: Mutex<Contenu>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn verrou(&self) -> Result<MutexGuard<'_, Contenu>, ErreurHistorique> {
        self.contenu.lock().map_err(|_| ErreurHistorique::Verrou)
    }
}

impl HistoryStore for MemoryHistory {
    fn ajouter(&self, entree: NouvelleEntree<'_>) -> Result<HistoryEntry, ErreurHistorique> {
        let mut c = self.verrou()?;
        c.prochain_id += 1;

        let e = HistoryEntry {
            id: c.prochain_id,
            user_id: entree.user_id.to_string(),
            expression: entree.expression.to_string(),
            result: entree.result,
            mode: entree.mode,
            created_at: Utc::now(),
        };

        c.par_utilisateur
            .entry(e.user_id.clone())
            .or_default()
            .push(e.clone());
        Ok(e)
    }

    fn lister(&self, user_id: &str, limite: usize) -> Result<Vec<HistoryEntry>, ErreurHistorique> {
        let c = self.verrou()?;
        Ok(c.par_utilisateur
            .get(user_id)
            .map(|v| v.iter().rev().take(limite).cloned().collect())
            .unwrap_or_default())
    }

    fn effacer(&self, user_id: &str) -> Result<usize, ErreurHistorique> {
        let mut c = self.verrou()?;
        Ok(c.par_utilisateur.remove(user_id).map_or(0, |v| v.len()))
    }
}

// src/app.rs
//
// Couche appelante (racine)
// -------------------------
// - reglages.rs  : valeurs par défaut (mode DEG, limites d’historique, profondeur)
// - etat.rs      : session interactive (entrée, résultat, mémoire, historique local)
// - vue.rs       : REPL texte sur AppCalc
// - historique.rs: dépôt d’historique par utilisateur
// - service.rs   : façade evaluate/history/clear
// - requete.rs   : charges utiles JSON -> réponses {status, body}
//
// Le noyau ne dépend d’aucun de ces modules.

pub mod etat;
pub mod historique;
pub mod reglages;
pub mod requete;
pub mod service;
pub mod vue;

pub use etat::AppCalc;
pub use historique::{HistoryEntry, HistoryStore, MemoryHistory};
pub use reglages::Reglages;
pub use service::{CalculatorService, ErreurService, EvaluationResult};

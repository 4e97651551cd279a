// src/noyau/moteur.rs
//
// Façade du noyau : jetons -> Expr -> f64
// --------------------------------------
// - Sans état : aucun cache de jetons / d’arbre, même pour une expression répétée
// - Aucune reprise, aucun résultat partiel : la première erreur remonte inchangée
// - Aucune E/S, aucune journalisation (pure)

use super::analyse::{parse_avec_limite, PROFONDEUR_MAX, PROFONDEUR_PLAFOND};
use super::erreur::ErreurCalcul;
use super::eval::evaluate_node;
use super::expr::Expr;
use super::jetons::{tokenize, Jeton};
use super::trig::AngleMode;

/// Évalue une expression avec la limite de profondeur par défaut.
pub fn evaluate(expression: &str, mode: AngleMode) -> Result<f64, ErreurCalcul> {
    CalculatorEngine::default().evaluate(expression, mode)
}

/// Moteur configurable (seul réglage : la limite de profondeur).
/// `Copy` et sans état interne : partageable entre threads sans verrou.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalculatorEngine {
    max_profondeur: usize,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self {
            max_profondeur: PROFONDEUR_MAX,
        }
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limite d’imbrication, ramenée dans [1, PROFONDEUR_PLAFOND].
    pub fn with_max_depth(max: usize) -> Self {
        Self {
            max_profondeur: max.clamp(1, PROFONDEUR_PLAFOND),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_profondeur
    }

    pub fn evaluate(&self, expression: &str, mode: AngleMode) -> Result<f64, ErreurCalcul> {
        let jetons = self.tokenize(expression)?;
        let arbre = self.parse(&jetons)?;
        evaluate_node(&arbre, mode)
    }

    pub fn tokenize(&self, expression: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
        tokenize(expression)
    }

    pub fn parse(&self, jetons: &[Jeton]) -> Result<Expr, ErreurCalcul> {
        parse_avec_limite(jetons, self.max_profondeur)
    }
}

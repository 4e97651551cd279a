// src/noyau/erreur.rs
//
// Erreurs du noyau
// ----------------
// Trois familles disjointes (+ garde-fou de profondeur) :
// - CaractereInvalide : échec lexical (caractère ou identifiant inconnu)
// - Syntaxe           : la suite de jetons ne respecte pas la grammaire
// - Math              : échec sémantique pendant l’évaluation
// - TropProfond       : imbrication au-delà de la limite configurée
//
// Aucune étape ne rattrape ses propres erreurs : un appel réussit entièrement
// ou remonte exactement une de ces erreurs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    /// Caractère ou suite de lettres non reconnue par le lexer.
    #[error("Invalid character '{texte}' at position {position}")]
    CaractereInvalide { texte: String, position: usize },

    /// Structure invalide (jeton inattendu, parenthèse manquante…).
    #[error("{message} at position {position}")]
    Syntaxe { message: String, position: usize },

    /// Division par zéro, domaine de fonction, dépassement du factoriel.
    #[error("{0}")]
    Math(String),

    #[error("Expression nesting exceeds {max} levels at position {position}")]
    TropProfond { max: usize, position: usize },
}

impl ErreurCalcul {
    pub(crate) fn syntaxe(message: impl Into<String>, position: usize) -> Self {
        ErreurCalcul::Syntaxe {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn math(message: impl Into<String>) -> Self {
        ErreurCalcul::Math(message.into())
    }

    /// Position source de l’erreur, si elle en a une (Math n’en a pas).
    pub fn position(&self) -> Option<usize> {
        match self {
            ErreurCalcul::CaractereInvalide { position, .. }
            | ErreurCalcul::Syntaxe { position, .. }
            | ErreurCalcul::TropProfond { position, .. } => Some(*position),
            ErreurCalcul::Math(_) => None,
        }
    }

    /// Nom stable de la famille d’erreur (journalisation, réponses JSON).
    pub fn famille(&self) -> &'static str {
        match self {
            ErreurCalcul::CaractereInvalide { .. } => "InvalidCharacterError",
            ErreurCalcul::Syntaxe { .. } => "SyntaxError",
            ErreurCalcul::Math(_) => "MathError",
            ErreurCalcul::TropProfond { .. } => "DepthLimitError",
        }
    }
}

//! Noyau de calcul scientifique (f64)
//!
//! Organisation interne :
//! - jetons.rs    : lexer (Jeton, Tok, Op, Constante)
//! - analyse.rs   : descente récursive -> Expr + garde-fou de profondeur
//! - expr.rs      : AST (Num / Binaire / Fonction)
//! - eval.rs      : parcours postfixe, opérateurs
//! - fonctions.rs : bibliothèque fermée (domaines, factoriel, arrondi)
//! - trig.rs      : AngleMode + conversions DEG/RAD
//! - moteur.rs    : façade evaluate(expression, mode)
//! - format.rs    : affichage d’un résultat f64
//! - erreur.rs    : ErreurCalcul
//!
//! Pur : aucune E/S, aucune journalisation, aucun état partagé.

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod moteur;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use format::format_resultat;
pub use moteur::{evaluate, CalculatorEngine};
pub use trig::AngleMode;

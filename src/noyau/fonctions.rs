// src/noyau/fonctions.rs
//
// Bibliothèque de fonctions (unaire, ensemble FERMÉ)
// -------------------------------------------------
// Le lexer n’accepte que ces noms : tout le reste est rejeté avant le parse.
// Chaque fonction porte sa propre politique de domaine / dépassement.

use std::fmt;

use num_traits::ToPrimitive;

use super::erreur::ErreurCalcul;
use super::trig::{trig_eval, AngleMode, TrigFn};

/// Plus grand n tel que n! reste fini en f64.
pub const FACT_MAX: f64 = 170.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Ln,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Abs,
    Cbrt,
    Fact,
    Floor,
    Ceil,
    Round,
}

impl Fonction {
    pub const TOUTES: [Fonction; 19] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Sqrt,
        Fonction::Log,
        Fonction::Ln,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Sinh,
        Fonction::Cosh,
        Fonction::Tanh,
        Fonction::Exp,
        Fonction::Abs,
        Fonction::Cbrt,
        Fonction::Fact,
        Fonction::Floor,
        Fonction::Ceil,
        Fonction::Round,
    ];

    /// Nom exact (minuscules) tel qu’écrit dans une expression.
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sinh => "sinh",
            Fonction::Cosh => "cosh",
            Fonction::Tanh => "tanh",
            Fonction::Exp => "exp",
            Fonction::Abs => "abs",
            Fonction::Cbrt => "cbrt",
            Fonction::Fact => "fact",
            Fonction::Floor => "floor",
            Fonction::Ceil => "ceil",
            Fonction::Round => "round",
        }
    }

    /// Correspondance exacte, sensible à la casse ("SIN" n’est pas une fonction).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Self::TOUTES.iter().copied().find(|f| f.nom() == nom)
    }

    /// Applique la fonction à un argument déjà évalué.
    pub fn appliquer(self, a: f64, mode: AngleMode) -> Result<f64, ErreurCalcul> {
        let v = match self {
            Fonction::Sin => trig_eval(TrigFn::Sin, a, mode)?,
            Fonction::Cos => trig_eval(TrigFn::Cos, a, mode)?,
            Fonction::Tan => trig_eval(TrigFn::Tan, a, mode)?,
            Fonction::Asin => trig_eval(TrigFn::Asin, a, mode)?,
            Fonction::Acos => trig_eval(TrigFn::Acos, a, mode)?,
            Fonction::Atan => trig_eval(TrigFn::Atan, a, mode)?,

            Fonction::Sqrt => {
                if a < 0.0 {
                    return Err(ErreurCalcul::math(
                        "Cannot take square root of negative number",
                    ));
                }
                a.sqrt()
            }
            Fonction::Log => {
                if a <= 0.0 {
                    return Err(ErreurCalcul::math("Logarithm argument must be positive"));
                }
                a.log10()
            }
            Fonction::Ln => {
                if a <= 0.0 {
                    return Err(ErreurCalcul::math(
                        "Natural logarithm argument must be positive",
                    ));
                }
                a.ln()
            }

            Fonction::Sinh => a.sinh(),
            Fonction::Cosh => a.cosh(),
            Fonction::Tanh => a.tanh(),
            Fonction::Exp => a.exp(),
            Fonction::Abs => a.abs(),
            Fonction::Cbrt => a.cbrt(),

            Fonction::Fact => factorielle(a)?,

            Fonction::Floor => a.floor(),
            Fonction::Ceil => a.ceil(),
            Fonction::Round => arrondi_demi_haut(a),
        };
        Ok(v)
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/* ------------------------ Factorielle ------------------------ */

/// n! par produit itératif.
/// Ordre des contrôles : entier (NaN/∞ refusés ici), puis signe, puis borne 170.
pub fn factorielle(a: f64) -> Result<f64, ErreurCalcul> {
    if !a.is_finite() || a.fract() != 0.0 {
        return Err(ErreurCalcul::math(format!(
            "fact requires integer input, got {a}"
        )));
    }
    if a < 0.0 {
        return Err(ErreurCalcul::math(format!(
            "fact domain error: negative input {a}"
        )));
    }
    if a > FACT_MAX {
        return Err(ErreurCalcul::math(format!(
            "fact overflow: {a}! exceeds f64::MAX"
        )));
    }

    // a ∈ [0, 170] entier : conversion toujours possible
    let n = a.to_u32().unwrap_or(0);
    let mut acc = 1.0_f64;
    for i in 2..=n {
        acc *= f64::from(i);
    }
    Ok(acc)
}

/* ------------------------ Arrondi ------------------------ */

/// Demi vers +∞ : round(2.5) = 3, round(-2.5) = -2.
/// (f64::round arrondit loin de zéro : -2.5 -> -3, ce n’est pas ce qu’on veut)
pub fn arrondi_demi_haut(a: f64) -> f64 {
    let bas = a.floor();
    if a - bas >= 0.5 {
        bas + 1.0
    } else {
        bas
    }
}

// src/noyau/trig.rs
//
// Trigonométrie + mode d’angle
// ----------------------------
// - AngleMode : paramètre pur, fourni à chaque appel, jamais stocké par le noyau
// - sin/cos/tan : l’argument passe en radians si mode = DEG
// - asin/acos/atan : le résultat repasse en degrés si mode = DEG
// - asin/acos : domaine [-1, 1] contrôlé (erreur nommant la fonction)

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::erreur::ErreurCalcul;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleMode {
    #[serde(rename = "DEG", alias = "deg")]
    Deg,
    #[default]
    #[serde(rename = "RAD", alias = "rad")]
    Rad,
}

impl AngleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleMode::Deg => "DEG",
            AngleMode::Rad => "RAD",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AngleMode {
    type Err = String;

    /// Insensible à la casse : "deg", "DEG", "Rad"…
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEG" => Ok(AngleMode::Deg),
            "RAD" => Ok(AngleMode::Rad),
            autre => Err(format!("mode d’angle inconnu: '{autre}' (attendu DEG ou RAD)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

/* ------------------------ Conversions ------------------------ */

/// Entrée des fonctions directes : degrés -> radians si besoin.
pub fn vers_radians(a: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Deg => (a * PI) / 180.0,
        AngleMode::Rad => a,
    }
}

/// Sortie des fonctions inverses : radians -> degrés si besoin.
pub fn depuis_radians(r: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Deg => r * 180.0 / PI,
        AngleMode::Rad => r,
    }
}

/* ------------------------ Évaluation ------------------------ */

pub fn trig_eval(f: TrigFn, a: f64, mode: AngleMode) -> Result<f64, ErreurCalcul> {
    let v = match f {
        TrigFn::Sin => vers_radians(a, mode).sin(),
        TrigFn::Cos => vers_radians(a, mode).cos(),
        TrigFn::Tan => vers_radians(a, mode).tan(),

        TrigFn::Asin => {
            domaine_unitaire("asin", a)?;
            depuis_radians(a.asin(), mode)
        }
        TrigFn::Acos => {
            domaine_unitaire("acos", a)?;
            depuis_radians(a.acos(), mode)
        }
        TrigFn::Atan => depuis_radians(a.atan(), mode),
    };
    Ok(v)
}

/// [-1, 1] ; NaN passe (comparaisons IEEE fausses) et donne NaN ensuite.
fn domaine_unitaire(nom: &str, a: f64) -> Result<(), ErreurCalcul> {
    if a < -1.0 || a > 1.0 {
        return Err(ErreurCalcul::math(format!(
            "{nom} domain error: {a} not in [-1, 1]"
        )));
    }
    Ok(())
}

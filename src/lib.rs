// src/lib.rs
//
// Calculatrice scientifique : noyau pur (noyau/) + couche appelante (app/).

pub mod app;
pub mod noyau;

pub use noyau::{evaluate, format_resultat, AngleMode, CalculatorEngine, ErreurCalcul};

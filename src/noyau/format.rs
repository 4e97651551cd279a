// src/noyau/format.rs
//
// Affichage d’un résultat f64 (historique, CLI, réponses).
// - plus courte écriture décimale qui relit la même valeur
// - entiers sans ".0", zéro signé affiché "0"
// - NaN / Infinity / -Infinity
// - notation exponentielle hors de [1e-6, 1e21) : "1e+21", "1.5e-7"

/// Bornes de la notation décimale simple.
const DECIMAL_MIN: f64 = 1e-6;
const DECIMAL_MAX: f64 = 1e21;

pub fn format_resultat(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if (DECIMAL_MIN..DECIMAL_MAX).contains(&abs) {
        return format!("{v}");
    }

    // "{:e}" donne "1e21" / "1.5e-7" : on ajoute le signe explicite des exposants positifs
    let brut = format!("{v:e}");
    match brut.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => brut,
    }
}

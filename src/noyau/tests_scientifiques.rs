//! Tests scientifiques (campagne) : propriétés du moteur, de bout en bout.
//!
//! Tout passe par la façade `evaluate(expression, mode)` :
//! - précédence / associativité
//! - mode d’angle (directes en entrée, inverses en sortie)
//! - domaines + dépassements (MathError)
//! - constantes, erreurs lexicales et syntaxiques
//! - idempotence (aucun état caché)

use std::f64::consts::{E, PI};

use super::erreur::ErreurCalcul;
use super::moteur::evaluate;
use super::trig::AngleMode::{self, Deg, Rad};

fn eval_ok(expr: &str, mode: AngleMode) -> f64 {
    evaluate(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/// Équivalent de toBeCloseTo(attendu, decimales) : |a - b| < 10^-d / 2
fn assert_proche(expr: &str, mode: AngleMode, attendu: f64, decimales: i32) {
    let v = eval_ok(expr, mode);
    let eps = 10f64.powi(-decimales) / 2.0;
    assert!(
        (v - attendu).abs() < eps,
        "expr={expr:?} mode={mode}: {v} != {attendu} (±{eps})"
    );
}

fn assert_exact(expr: &str, attendu: f64) {
    assert_eq!(eval_ok(expr, Rad), attendu, "expr={expr:?}");
}

fn assert_math(expr: &str, fragment: &str) {
    match evaluate(expr, Rad) {
        Err(ErreurCalcul::Math(msg)) => {
            assert!(msg.contains(fragment), "expr={expr:?}: {msg:?} sans {fragment:?}")
        }
        autre => panic!("expr={expr:?}: MathError attendue, obtenu {autre:?}"),
    }
}

fn assert_syntaxe(expr: &str) {
    assert!(
        matches!(evaluate(expr, Rad), Err(ErreurCalcul::Syntaxe { .. })),
        "expr={expr:?}: SyntaxError attendue"
    );
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    assert_exact("2 + 3 * 4", 14.0);
    assert_exact("2 * 3 + 4", 10.0);
    assert_exact("(2 + 3) * 4", 20.0);
    assert_exact("2 + 3 ^ 2 * 2", 20.0);
    assert_exact("-3 + 5", 2.0);
}

#[test]
fn sci_associativite() {
    assert_exact("2^3^2", 512.0);
    assert_exact("10 - 5 - 2", 3.0);
    assert_exact("100 / 10 / 5", 2.0);
    assert_exact("2 - -2", 4.0);
}

#[test]
fn sci_moins_unaire_sur_base() {
    // '-' appartient à base : -2^2 = (-2)^2
    assert_exact("-2^2", 4.0);
    assert_exact("-(2^2)", -4.0);
    assert_exact("--5", 5.0);
}

/* ------------------------ Trigonométrie / mode ------------------------ */

#[test]
fn sci_inverses_rad() {
    assert_proche("asin(0.5)", Rad, 0.5236, 3);
    assert_proche("asin(0)", Rad, 0.0, 5);
    assert_proche("asin(1)", Rad, PI / 2.0, 5);
    assert_proche("acos(0.5)", Rad, 1.0472, 3);
    assert_proche("acos(1)", Rad, 0.0, 5);
    assert_proche("atan(1)", Rad, PI / 4.0, 5);
}

#[test]
fn sci_inverses_deg() {
    assert_proche("asin(0.5)", Deg, 30.0, 1);
    assert_proche("asin(1)", Deg, 90.0, 1);
    assert_proche("acos(0.5)", Deg, 60.0, 1);
    assert_proche("acos(0)", Deg, 90.0, 1);
    assert_proche("atan(1)", Deg, 45.0, 1);
}

#[test]
fn sci_directes_deg() {
    assert_proche("sin(30)", Deg, 0.5, 10);
    assert_proche("cos(180)", Deg, -1.0, 10);
    assert_proche("tan(45)", Deg, 1.0, 10);
    // en RAD, le même argument donne autre chose
    assert_proche("sin(30)", Rad, (30.0f64).sin(), 12);
}

#[test]
fn sci_aller_retour_inverses() {
    for i in -10..=10 {
        let x = f64::from(i) / 10.0;
        let expr = format!("sin(asin({x}))");
        assert_proche(&expr, Rad, x, 5);
    }
    assert_proche("cos(acos(0.5))", Rad, 0.5, 5);
    assert_proche("tan(atan(1))", Rad, 1.0, 5);
    assert_proche("sin(asin(0.5))", Deg, 0.5, 5);
}

#[test]
fn sci_domaines_trig() {
    assert_math("asin(2)", "asin domain error");
    assert_math("asin(-2)", "asin domain error");
    assert_math("asin(1.1)", "asin domain error");
    assert_math("acos(2)", "acos domain error");
    assert_math("acos(-2)", "acos domain error");
}

/* ------------------------ Autres fonctions ------------------------ */

#[test]
fn sci_hyperboliques() {
    assert_exact("sinh(0)", 0.0);
    assert_exact("cosh(0)", 1.0);
    assert_exact("tanh(0)", 0.0);
    assert_proche("sinh(1)", Rad, 1.1752, 4);
    assert_proche("sinh(-1)", Rad, -1.1752, 4);
    assert_proche("cosh(1)", Rad, 1.5431, 4);
    assert_proche("tanh(-1)", Rad, -0.7616, 4);
}

#[test]
fn sci_puissances_racines() {
    assert_proche("exp(1)", Rad, E, 5);
    assert_proche("exp(2)", Rad, 7.389, 3);
    assert_exact("abs(-5)", 5.0);
    assert_exact("abs(0)", 0.0);
    assert_exact("cbrt(27)", 3.0);
    assert_proche("cbrt(-8)", Rad, -2.0, 5);
    assert_exact("sqrt(16)", 4.0);
    assert_proche("log(1000)", Rad, 3.0, 10);
    assert_proche("ln(E)", Rad, 1.0, 10);
}

#[test]
fn sci_domaines_racine_logs() {
    assert_math("sqrt(-1)", "square root");
    assert_math("log(0)", "Logarithm argument must be positive");
    assert_math("ln(-1)", "Natural logarithm");
    assert_math("5/0", "Division by zero");
    assert_math("1/(2-2)", "Division by zero");
}

#[test]
fn sci_factorielle() {
    assert_exact("fact(0)", 1.0);
    assert_exact("fact(5)", 120.0);
    assert_exact("fact(10)", 3_628_800.0);

    let f = eval_ok("fact(170)", Rad);
    assert!(f.is_finite() && f > 0.0);

    assert_math("fact(171)", "overflow");
    assert_math("fact(-1)", "negative input");
    assert_math("fact(5.5)", "integer input");
    assert_math("fact(3.14)", "fact requires integer input");
}

#[test]
fn sci_arrondis() {
    assert_exact("floor(3.7)", 3.0);
    assert_exact("floor(-2.3)", -3.0);
    assert_exact("ceil(3.2)", 4.0);
    assert_exact("ceil(-2.7)", -2.0);
    assert_exact("round(3.4)", 3.0);
    assert_exact("round(3.5)", 4.0);
    assert_exact("round(2.5)", 3.0);
    assert_exact("round(-2.5)", -2.0);
}

/* ------------------------ Constantes ------------------------ */

#[test]
fn sci_constantes() {
    assert_proche("PI", Rad, 3.14159, 5);
    assert_proche("E", Rad, 2.71828, 5);
    assert_proche("E + 1", Rad, E + 1.0, 5);
    assert_proche("PI / 2", Rad, PI / 2.0, 5);
    assert_proche("sin(PI / 2)", Rad, 1.0, 5);
    assert_proche("exp(1) - E", Rad, 0.0, 10);
    assert_exact("floor(PI)", 3.0);
    assert_exact("ceil(E)", 3.0);
}

/* ------------------------ Erreurs lexicales / syntaxiques ------------------------ */

#[test]
fn sci_erreur_lexicale() {
    assert!(matches!(
        evaluate("2 $ 3", Rad),
        Err(ErreurCalcul::CaractereInvalide { position: 2, .. })
    ));
    assert!(matches!(
        evaluate("x + 1", Rad),
        Err(ErreurCalcul::CaractereInvalide { .. })
    ));
    assert!(matches!(
        evaluate("pi", Rad),
        Err(ErreurCalcul::CaractereInvalide { .. })
    ));
}

#[test]
fn sci_erreurs_syntaxe() {
    assert_syntaxe("2 +");
    assert_syntaxe("(2+3");
    assert_syntaxe("");
    assert_syntaxe("   ");
    assert_syntaxe("2 3");
    assert_syntaxe("sin 30");
    assert_syntaxe("1.2.3");
    assert_syntaxe("()");
}

/* ------------------------ Résultats non finis / pureté ------------------------ */

#[test]
fn sci_non_finis_autorises() {
    assert!(eval_ok("(-8)^(1/3)", Rad).is_nan());
    assert!(eval_ok("10^400", Rad).is_infinite());
    assert!(eval_ok("exp(1000)", Rad).is_infinite());
}

#[test]
fn sci_idempotence() {
    for expr in ["2^3^2", "asin(0.5)", "fact(20) / fact(18)", "sin(PI/3)"] {
        for mode in [Deg, Rad] {
            let a = eval_ok(expr, mode);
            let b = eval_ok(expr, mode);
            assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?}");
        }
    }
    let e1 = evaluate("asin(3)", Deg).unwrap_err();
    let e2 = evaluate("asin(3)", Deg).unwrap_err();
    assert_eq!(e1, e2);
}

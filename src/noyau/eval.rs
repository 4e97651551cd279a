//! Noyau : évaluation (parcours postfixe de l’arbre)
//!
//! Enfants d’abord (gauche puis droite), puis combinaison au parent. Le mode d’angle est passé tel quel
//! à chaque appel de fonction ; il n’est jamais stocké.
//!
//! Aucune erreur n’est rattrapée ici : la première MathError remonte telle quelle.

use super::erreur::ErreurCalcul;
use super::expr::Expr;
use super::jetons::Op;
use super::trig::AngleMode;

pub fn evaluate_node(expr: &Expr, mode: AngleMode) -> Result<f64, ErreurCalcul> {
    // Épine gauche (chaînes a+b+c… pliées par le parse) : descente en boucle.
    // Seuls les opérandes droits et les arguments récursent, bornés par l’imbrication.
    let mut epine: Vec<(Op, &Expr)> = Vec::new();
    let mut noeud = expr;

    let mut acc = loop {
        match noeud {
            Expr::Binaire(op, a, b) => {
                epine.push((*op, b.as_ref()));
                noeud = a.as_ref();
            }
            Expr::Num(v) => break *v,
            Expr::Fonction(f, x) => {
                let arg = evaluate_node(x, mode)?;
                break f.appliquer(arg, mode)?;
            }
        }
    };

    // du bas vers la racine : gauche déjà évaluée, puis droite, puis combinaison
    for (op, droite) in epine.iter().rev() {
        let d = evaluate_node(droite, mode)?;
        acc = appliquer_op(*op, acc, d)?;
    }
    Ok(acc)
}

/// `/` refuse toujours un diviseur nul (0.0 comme -0.0), même si IEEE donnerait ±∞/NaN.
/// `^` suit powf sans cas particulier : (-8)^(1/3) = NaN.
pub fn appliquer_op(op: Op, a: f64, b: f64) -> Result<f64, ErreurCalcul> {
    let v = match op {
        Op::Plus => a + b,
        Op::Minus => a - b,
        Op::Star => a * b,
        Op::Slash => {
            if b == 0.0 {
                return Err(ErreurCalcul::math("Division by zero"));
            }
            a / b
        }
        Op::Caret => a.powf(b),
    };
    Ok(v)
}

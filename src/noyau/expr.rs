// src/noyau/expr.rs
//
// AST flottant (f64).
// - Num      : littéral (les constantes PI/E y sont déjà résolues par le parse)
// - Binaire  : + - * / ^ (le moins unaire est représenté par 0 - x)
// - Fonction : appel unaire, argument unique
//
// Arbre fini, acyclique, enfants possédés (Box) : construit une fois par le parse,
// parcouru une fois par l’évaluation, jamais muté.

use std::fmt;
use std::mem;

use super::fonctions::Fonction;
use super::jetons::Op;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Binaire(Op, Box<Expr>, Box<Expr>),
    Fonction(Fonction, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Fonction(f, Box::new(x))
    }

    /// Moins unaire : -x => 0 - x
    pub fn oppose(x: Expr) -> Expr {
        Expr::binaire(Op::Minus, Expr::Num(0.0), x)
    }

    /// Profondeur de l’arbre (feuille = 1).
    /// Itératif : ne dépend pas de la pile d’appels.
    pub fn profondeur(&self) -> usize {
        let mut pile: Vec<(&Expr, usize)> = Vec::with_capacity(32);
        pile.push((self, 1));
        let mut max = 0;

        while let Some((e, d)) = pile.pop() {
            max = max.max(d);
            match e {
                Expr::Num(_) => {}
                Expr::Fonction(_, x) => pile.push((x.as_ref(), d + 1)),
                Expr::Binaire(_, a, b) => {
                    pile.push((a.as_ref(), d + 1));
                    pile.push((b.as_ref(), d + 1));
                }
            }
        }

        max
    }
}

/// Affichage infixe entièrement parenthésé (non ambigu) : "(2 + (3 * 4))".
/// Épine gauche en boucle, comme l’évaluation.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut epine: Vec<(Op, &Expr)> = Vec::new();
        let mut noeud = self;

        loop {
            match noeud {
                Expr::Binaire(op, a, b) => {
                    epine.push((*op, b.as_ref()));
                    noeud = a.as_ref();
                }
                Expr::Num(v) => {
                    write!(f, "{}{v}", "(".repeat(epine.len()))?;
                    break;
                }
                Expr::Fonction(func, x) => {
                    write!(f, "{}{func}({x})", "(".repeat(epine.len()))?;
                    break;
                }
            }
        }

        for (op, droite) in epine.iter().rev() {
            write!(f, " {op} {droite})")?;
        }
        Ok(())
    }
}

/// Libération itérative (pile explicite) : aucune récursion sur l’épine gauche.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile: Vec<Expr> = Vec::new();
        detacher_enfants(self, &mut pile);
        while let Some(mut e) = pile.pop() {
            detacher_enfants(&mut e, &mut pile);
        }
    }
}

fn detacher_enfants(e: &mut Expr, pile: &mut Vec<Expr>) {
    match e {
        Expr::Num(_) => {}
        Expr::Fonction(_, x) => detacher(x, pile),
        Expr::Binaire(_, a, b) => {
            detacher(a, pile);
            detacher(b, pile);
        }
    }
}

fn detacher(enfant: &mut Expr, pile: &mut Vec<Expr>) {
    if !matches!(enfant, Expr::Num(_)) {
        pile.push(mem::replace(enfant, Expr::Num(0.0)));
    }
}

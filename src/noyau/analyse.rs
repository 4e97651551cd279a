// src/noyau/analyse.rs
//
// Descente récursive -> Expr
// Grammaire (du plus lâche au plus serré) :
//
//   expression := term (('+' | '-') term)*      gauche (pliage itératif)
//   term       := factor (('*' | '/') factor)*  gauche (pliage itératif)
//   factor     := base ('^' factor)?            droite (récursion sur factor)
//   base       := NUMBER | CONSTANT | '-' base | '(' expression ')' | FUNCTION '(' expression ')'
//
// Garde-fou d’imbrication :
// - compteur à la descente (chaque factor, chaque moins unaire) ; au-delà : TropProfond
// - les chaînes a+b+c+… / a*b*c… sont pliées en boucle et ne comptent pas
// - limite bornée à PROFONDEUR_PLAFOND, quelle que soit la demande
// Toute récursion sur l’arbre (évaluation, affichage) suit ce compteur ; les épines
// gauches des chaînes sont parcourues en boucle (voir eval.rs, expr.rs).

use super::erreur::ErreurCalcul;
use super::expr::Expr;
use super::jetons::{Jeton, Op, Tok};

/// Limite par défaut de l’imbrication.
pub const PROFONDEUR_MAX: usize = 256;

/// Plafond de toute limite configurée : tient sur une pile de 2 Mio en build debug.
pub const PROFONDEUR_PLAFOND: usize = 256;

type Resultat = Result<Expr, ErreurCalcul>;

pub fn parse(jetons: &[Jeton]) -> Resultat {
    parse_avec_limite(jetons, PROFONDEUR_MAX)
}

/// `max` est ramené dans [1, PROFONDEUR_PLAFOND].
pub fn parse_avec_limite(jetons: &[Jeton], max: usize) -> Resultat {
    // contrat du lexer : la suite se termine par Fin
    match jetons.last() {
        Some(j) if j.tok == Tok::Fin => {}
        dernier => {
            let position = dernier.map_or(0, |j| j.position + j.texte.chars().count());
            return Err(ErreurCalcul::syntaxe("Missing end of input token", position));
        }
    }

    let mut p = Parseur {
        jetons,
        courant: 0,
        imbrication: 0,
        max: max.clamp(1, PROFONDEUR_PLAFOND),
    };
    p.parse_complet()
}

struct Parseur<'a> {
    jetons: &'a [Jeton],
    courant: usize,
    imbrication: usize,
    max: usize,
}

impl<'a> Parseur<'a> {
    fn parse_complet(&mut self) -> Resultat {
        let e = self.parse_expression()?;
        if self.jeton().tok != Tok::Fin {
            return Err(self.erreur_ici("Unexpected token after expression"));
        }
        Ok(e)
    }

    /* ------------------------ Curseur ------------------------ */

    fn jeton(&self) -> &'a Jeton {
        // Fin n’est jamais dépassé (voir avancer)
        let jetons = self.jetons;
        &jetons[self.courant]
    }

    fn avancer(&mut self) -> &'a Jeton {
        let j = self.jeton();
        if j.tok != Tok::Fin {
            self.courant += 1;
        }
        j
    }

    /// Opérateur courant s’il fait partie de `ops`.
    fn op_parmi(&self, ops: &[Op]) -> Option<Op> {
        match self.jeton().tok {
            Tok::Op(op) if ops.contains(&op) => Some(op),
            _ => None,
        }
    }

    fn attendre(&mut self, tok: Tok, message: &'static str) -> Result<(), ErreurCalcul> {
        if self.jeton().tok != tok {
            return Err(self.erreur_ici(message));
        }
        self.avancer();
        Ok(())
    }

    /* ------------------------ Garde-fou ------------------------ */

    fn entrer(&mut self) -> Result<(), ErreurCalcul> {
        if self.imbrication >= self.max {
            return Err(self.trop_profond());
        }
        self.imbrication += 1;
        Ok(())
    }

    fn sortir(&mut self) {
        self.imbrication = self.imbrication.saturating_sub(1);
    }

    /* ------------------------ Erreurs (hors des cadres récursifs) ------------------------ */

    #[cold]
    #[inline(never)]
    fn trop_profond(&self) -> ErreurCalcul {
        ErreurCalcul::TropProfond {
            max: self.max,
            position: self.jeton().position,
        }
    }

    #[cold]
    #[inline(never)]
    fn erreur_ici(&self, message: &'static str) -> ErreurCalcul {
        ErreurCalcul::syntaxe(message, self.jeton().position)
    }

    /* ------------------------ Règles ------------------------ */

    // expression := term (('+' | '-') term)*
    fn parse_expression(&mut self) -> Resultat {
        let mut gauche = self.parse_term()?;

        while let Some(op) = self.op_parmi(&[Op::Plus, Op::Minus]) {
            self.avancer();
            let droite = self.parse_term()?;
            gauche = Expr::binaire(op, gauche, droite);
        }

        Ok(gauche)
    }

    // term := factor (('*' | '/') factor)*
    fn parse_term(&mut self) -> Resultat {
        let mut gauche = self.parse_factor()?;

        while let Some(op) = self.op_parmi(&[Op::Star, Op::Slash]) {
            self.avancer();
            let droite = self.parse_factor()?;
            gauche = Expr::binaire(op, gauche, droite);
        }

        Ok(gauche)
    }

    // factor := base ('^' factor)?
    fn parse_factor(&mut self) -> Resultat {
        self.entrer()?;
        let r = self.parse_factor_interne();
        self.sortir();
        r
    }

    fn parse_factor_interne(&mut self) -> Resultat {
        let base = self.parse_base()?;

        if self.op_parmi(&[Op::Caret]).is_none() {
            return Ok(base);
        }
        self.avancer();
        // droite : on recurse sur factor, pas sur base => 2^3^2 = 2^(3^2)
        let exposant = self.parse_factor()?;
        Ok(Expr::binaire(Op::Caret, base, exposant))
    }

    // base := NUMBER | CONSTANT | '-' base | '(' expression ')' | FUNCTION '(' expression ')'
    fn parse_base(&mut self) -> Resultat {
        let j = self.avancer();

        match j.tok {
            Tok::Num => lire_nombre(j),

            // valeur résolue ici, pas à l’évaluation
            Tok::Constante(k) => Ok(Expr::Num(k.valeur())),

            Tok::Op(Op::Minus) => {
                self.entrer()?;
                let r = self.parse_base();
                self.sortir();
                Ok(Expr::oppose(r?))
            }

            Tok::LPar => {
                let e = self.parse_expression()?;
                self.attendre(Tok::RPar, "Expected closing parenthesis")?;
                Ok(e)
            }

            Tok::Fonction(f) => {
                self.attendre(Tok::LPar, "Expected '(' after function name")?;
                let argument = self.parse_expression()?;
                self.attendre(Tok::RPar, "Expected ')' after function argument")?;
                Ok(Expr::appel(f, argument))
            }

            // Fin n’avance pas : le curseur est encore dessus
            Tok::Fin => Err(self.erreur_ici("Unexpected end of input")),

            Tok::Op(_) | Tok::RPar => Err(inattendu(j)),
        }
    }
}

fn lire_nombre(j: &Jeton) -> Resultat {
    j.texte
        .parse()
        .map(Expr::Num)
        .map_err(|_| litteral_invalide(j))
}

#[cold]
#[inline(never)]
fn litteral_invalide(j: &Jeton) -> ErreurCalcul {
    ErreurCalcul::syntaxe(format!("Invalid number literal '{}'", j.texte), j.position)
}

#[cold]
#[inline(never)]
fn inattendu(j: &Jeton) -> ErreurCalcul {
    ErreurCalcul::syntaxe(format!("Unexpected token: {}", j.texte), j.position)
}

// src/noyau/jetons.rs
//
// Lexer : une passe gauche -> droite, sans retour arrière.
// - espaces ignorés
// - nombre : commence par un chiffre, puis [0-9.]* (texte brut ; validé au parse)
// - opérateurs + - * / ^ et parenthèses ( )
// - MAJUSCULES : exactement PI ou E
// - minuscules : exactement un nom de la bibliothèque de fonctions
// - tout le reste : CaractereInvalide (fatal pour l’appel)
//
// Positions = index en CARACTÈRES (pas en octets).

use std::f64::consts;
use std::fmt;

use super::erreur::ErreurCalcul;
use super::fonctions::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
            Op::Caret => '^',
        }
    }

    fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            '^' => Some(Op::Caret),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    fn depuis_nom(nom: &str) -> Option<Constante> {
        match nom {
            "PI" => Some(Constante::Pi),
            "E" => Some(Constante::E),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tok {
    Num,
    Op(Op),
    LPar,
    RPar,
    Fonction(Fonction),
    Constante(Constante),
    Fin,
}

/// Jeton immuable : genre + texte source + position de départ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub tok: Tok,
    pub texte: String,
    pub position: usize,
}

impl Jeton {
    fn new(tok: Tok, texte: impl Into<String>, position: usize) -> Self {
        Self {
            tok,
            texte: texte.into(),
            position,
        }
    }
}

/// Tokenize une chaîne en jetons ; le dernier est toujours `Tok::Fin`.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::with_capacity(chars.len() / 2 + 1);
    let mut i: usize = 0;

    // suite contiguë de caractères satisfaisant `pred`, à partir de `debut`
    let suite = |debut: usize, pred: fn(&char) -> bool| -> usize {
        let mut j = debut;
        while j < chars.len() && pred(&chars[j]) {
            j += 1;
        }
        j
    };

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre (texte brut ; "1.2.3" passe ici et sera refusé au parse)
        if c.is_ascii_digit() {
            let fin = suite(i, |c| c.is_ascii_digit() || *c == '.');
            let texte: String = chars[i..fin].iter().collect();
            out.push(Jeton::new(Tok::Num, texte, i));
            i = fin;
            continue;
        }

        if let Some(op) = Op::depuis_char(c) {
            out.push(Jeton::new(Tok::Op(op), c.to_string(), i));
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Jeton::new(Tok::LPar, "(", i));
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::new(Tok::RPar, ")", i));
            i += 1;
            continue;
        }

        // Constantes : run de majuscules
        if c.is_ascii_uppercase() {
            let fin = suite(i, char::is_ascii_uppercase);
            let nom: String = chars[i..fin].iter().collect();
            let Some(k) = Constante::depuis_nom(&nom) else {
                return Err(ErreurCalcul::CaractereInvalide {
                    texte: nom,
                    position: i,
                });
            };
            out.push(Jeton::new(Tok::Constante(k), nom, i));
            i = fin;
            continue;
        }

        // Fonctions : run de minuscules
        if c.is_ascii_lowercase() {
            let fin = suite(i, char::is_ascii_lowercase);
            let nom: String = chars[i..fin].iter().collect();
            let Some(f) = Fonction::depuis_nom(&nom) else {
                return Err(ErreurCalcul::CaractereInvalide {
                    texte: nom,
                    position: i,
                });
            };
            out.push(Jeton::new(Tok::Fonction(f), nom, i));
            i = fin;
            continue;
        }

        return Err(ErreurCalcul::CaractereInvalide {
            texte: c.to_string(),
            position: i,
        });
    }

    out.push(Jeton::new(Tok::Fin, "", chars.len()));
    Ok(out)
}

/// Format utilitaire (debug / CLI --tokens) : jetons séparés par des espaces.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    tokens
        .iter()
        .map(|j| match j.tok {
            Tok::Fin => "<fin>".to_string(),
            _ => j.texte.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

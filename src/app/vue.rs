// src/app/vue.rs
//
// Vue texte (REPL ligne à ligne) sur le même AppCalc que le reste de la couche appelante.
// - une ligne = une expression évaluée
// - ":cmd" = action de session (mode, mémoire, historique)
// - générique sur BufRead / Write : testable sans terminal

use std::io::{BufRead, Write};

use log::debug;

use super::etat::AppCalc;
use crate::noyau::AngleMode;

/// Ce que produit une ligne de saisie.
#[derive(Debug, PartialEq)]
pub enum Issue {
    Continuer,
    Quitter,
}

pub const AIDE: &str = "\
expressions : 2 + 3 * 4, sin(30), fact(5), PI / 2 ...
commandes   : :deg :rad :hist :rappel N :clear :effacer :mc :mr :m+ :m- :ms :aide :q";

impl AppCalc {
    /// Boucle principale : lit jusqu’à EOF ou ":q".
    pub fn repl<R: BufRead, W: Write>(&mut self, entree: R, mut sortie: W) -> std::io::Result<()> {
        writeln!(sortie, "mode {} (:aide pour l’aide)", self.mode)?;

        for ligne in entree.lines() {
            let ligne = ligne?;
            if self.traiter_ligne(ligne.trim(), &mut sortie)? == Issue::Quitter {
                break;
            }
        }
        Ok(())
    }

    pub fn traiter_ligne<W: Write>(&mut self, ligne: &str, sortie: &mut W) -> std::io::Result<Issue> {
        if ligne.is_empty() {
            return Ok(Issue::Continuer);
        }

        if let Some(cmd) = ligne.strip_prefix(':') {
            return self.commande(cmd.trim(), sortie);
        }

        self.entree = ligne.to_string();
        match self.evaluer() {
            Ok(_) => writeln!(sortie, "= {}", self.resultat)?,
            Err(e) => {
                debug!("repl: {} pour {ligne:?}", e.famille());
                writeln!(sortie, "erreur : {e}")?;
            }
        }
        Ok(Issue::Continuer)
    }

    fn commande<W: Write>(&mut self, cmd: &str, sortie: &mut W) -> std::io::Result<Issue> {
        let (nom, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));

        match nom {
            "q" | "quit" => return Ok(Issue::Quitter),
            "deg" => {
                self.set_mode(AngleMode::Deg);
                writeln!(sortie, "mode DEG")?;
            }
            "rad" => {
                self.set_mode(AngleMode::Rad);
                writeln!(sortie, "mode RAD")?;
            }
            "hist" => {
                if self.historique.is_empty() {
                    writeln!(sortie, "(historique vide)")?;
                }
                for (i, e) in self.historique.iter().enumerate() {
                    writeln!(sortie, "{i:>3}  {} = {}", e.expression, e.resultat)?;
                }
            }
            "rappel" => match arg.trim().parse::<usize>() {
                Ok(i) if self.rappel(i) => writeln!(sortie, "{} = {}", self.entree, self.resultat)?,
                _ => writeln!(sortie, "rappel : index invalide")?,
            },
            "clear" => {
                self.clear();
                writeln!(sortie, "effacé")?;
            }
            "effacer" => {
                self.effacer_historique();
                writeln!(sortie, "historique effacé")?;
            }
            "mc" => self.mc(),
            "mr" => {
                self.entree.clear();
                self.mr();
                writeln!(sortie, "M = {}", self.entree)?;
            }
            "m+" => self.m_plus(),
            "m-" => self.m_moins(),
            "ms" => self.ms(),
            "aide" | "help" => writeln!(sortie, "{AIDE}")?,
            autre => writeln!(sortie, "commande inconnue : :{autre}")?,
        }
        Ok(Issue::Continuer)
    }
}

//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’état d’une calculatrice interactive (entrée, résultat, erreur,
//! mode, mémoire, historique local) et offrir des actions simples, sans affichage.
//!
//! Contrats :
//! - La seule évaluation passe par le moteur du noyau (jamais de parsing ici).
//! - Actions déterministes, sans effet de bord caché.
//! - Une erreur CONSERVE le dernier résultat (on n’efface pas l’écran sur une faute).

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::app::reglages::{Reglages, HISTORIQUE_LOCAL_MAX};
use crate::noyau::{format_resultat, AngleMode, CalculatorEngine, ErreurCalcul};

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeLocale {
    pub expression: String,
    pub valeur: f64,
    pub resultat: String,
    pub horodatage: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // affichage (format_resultat), "0" au départ
    pub valeur: f64,      // dernière valeur numérique (mémoire M+/M-/MS)
    pub erreur: String,   // message d’erreur (vide = aucune)

    // --- paramètres ---
    pub mode: AngleMode,
    moteur: CalculatorEngine,

    // --- mémoire + historique local (plus récent d’abord) ---
    pub memoire: f64,
    pub historique: VecDeque<EntreeLocale>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: &Reglages) -> Self {
        Self {
            entree: String::new(),
            resultat: "0".to_string(),
            valeur: 0.0,
            erreur: String::new(),
            mode: reglages.mode_defaut,
            moteur: reglages.moteur(),
            memoire: 0.0,
            historique: VecDeque::with_capacity(HISTORIQUE_LOCAL_MAX),
        }
    }

    /* ------------------------ Saisie ------------------------ */

    /// Ajoute du texte à l’entrée (efface l’erreur affichée).
    pub fn ajouter(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.erreur.clear();
    }

    /// Retire le dernier caractère de l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.pop();
        self.erreur.clear();
    }

    /// Entrée + résultat + erreur (mémoire et historique conservés).
    pub fn clear(&mut self) {
        self.entree.clear();
        self.resultat = "0".to_string();
        self.valeur = 0.0;
        self.erreur.clear();
    }

    pub fn set_mode(&mut self, mode: AngleMode) {
        self.mode = mode;
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Évalue l’entrée courante. Entrée vide : rien à faire (Ok(None)).
    pub fn evaluer(&mut self) -> Result<Option<f64>, ErreurCalcul> {
        if self.entree.trim().is_empty() {
            return Ok(None);
        }

        match self.moteur.evaluate(&self.entree, self.mode) {
            Ok(v) => {
                self.valeur = v;
                self.resultat = format_resultat(v);
                self.erreur.clear();
                self.pousser_historique();
                Ok(Some(v))
            }
            Err(e) => {
                self.erreur = e.to_string();
                Err(e)
            }
        }
    }

    fn pousser_historique(&mut self) {
        self.historique.push_front(EntreeLocale {
            expression: self.entree.clone(),
            valeur: self.valeur,
            resultat: self.resultat.clone(),
            horodatage: Utc::now(),
        });
        self.historique.truncate(HISTORIQUE_LOCAL_MAX);
    }

    /// Rappelle une entrée d’historique (0 = plus récente) ; false si hors bornes.
    pub fn rappel(&mut self, index: usize) -> bool {
        let Some(e) = self.historique.get(index) else {
            return false;
        };
        self.entree = e.expression.clone();
        self.resultat = e.resultat.clone();
        self.valeur = e.valeur;
        self.erreur.clear();
        true
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn mc(&mut self) {
        self.memoire = 0.0;
    }

    /// MR : ajoute la mémoire (formatée) à l’entrée.
    pub fn mr(&mut self) {
        let texte = format_resultat(self.memoire);
        self.ajouter(&texte);
    }

    pub fn m_plus(&mut self) {
        self.memoire += self.valeur;
    }

    pub fn m_moins(&mut self) {
        self.memoire -= self.valeur;
    }

    pub fn ms(&mut self) {
        self.memoire = self.valeur;
    }
}

//! src/app/reglages.rs
//!
//! Réglages de la couche appelante (service + session + CLI).
//!
//! Contrats :
//! - Valeurs par défaut = constantes ci-dessous (le noyau garde RAD par défaut,
//!   la couche appelante passe DEG par défaut).
//! - Chaque setter borne sa valeur.

use crate::noyau::analyse::PROFONDEUR_MAX;
pub use crate::noyau::analyse::PROFONDEUR_PLAFOND;
use crate::noyau::{AngleMode, CalculatorEngine};

/// Mode d’angle quand la requête n’en précise pas.
pub const MODE_DEFAUT: AngleMode = AngleMode::Deg;

/// Taille de page de l’historique persistant.
pub const LIMITE_HISTORIQUE_DEFAUT: usize = 50;
pub const LIMITE_HISTORIQUE_MAX: usize = 100;

/// Historique local de session (entrées les plus récentes gardées).
pub const HISTORIQUE_LOCAL_MAX: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub mode_defaut: AngleMode,
    pub limite_historique: usize,
    pub profondeur_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode_defaut: MODE_DEFAUT,
            limite_historique: LIMITE_HISTORIQUE_DEFAUT,
            profondeur_max: PROFONDEUR_MAX,
        }
    }
}

impl Reglages {
    pub fn set_mode_defaut(&mut self, mode: AngleMode) {
        self.mode_defaut = mode;
    }

    pub fn set_limite_historique(&mut self, n: usize) {
        self.limite_historique = n.clamp(1, LIMITE_HISTORIQUE_MAX);
    }

    pub fn set_profondeur_max(&mut self, n: usize) {
        self.profondeur_max = n.clamp(1, PROFONDEUR_PLAFOND);
    }

    /// Moteur configuré (sans état : on peut en recréer un à chaque appel).
    pub fn moteur(&self) -> CalculatorEngine {
        CalculatorEngine::with_max_depth(self.profondeur_max)
    }
}

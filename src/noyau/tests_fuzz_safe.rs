//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe) pour les expressions bien formées
//! - proptest pour les propriétés algébriques et les entrées arbitraires
//! - profondeur bornée, budget temps global
//! - invariant clé : une expression bien formée ne produit JAMAIS d’erreur
//!   lexicale/syntaxique, seulement (éventuellement) une MathError

use std::thread;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::erreur::ErreurCalcul;
use super::fonctions::Fonction;
use super::analyse::PROFONDEUR_PLAFOND;
use super::moteur::{evaluate, CalculatorEngine};
use super::trig::AngleMode;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "PI".to_string(),
        1 => "E".to_string(),
        2 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        3 => "0".to_string(), // utile pour provoquer division par zéro / domaines
        _ => format!("{}", rng.pick(200)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("-{}", gen_expr(rng, depth - 1)),
        2 => {
            let f = Fonction::TOUTES[rng.pick(Fonction::TOUTES.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        3 => format!("({})", gen_expr(rng, depth - 1)),
        _ => {
            let op = ['+', '-', '*', '/', '^'][rng.pick(5) as usize];
            format!(
                "{} {op} {}",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_forme_que_des_erreurs_math() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for i in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);
        let mode = if i % 2 == 0 {
            AngleMode::Deg
        } else {
            AngleMode::Rad
        };

        match evaluate(&expr, mode) {
            Ok(_) => seen_ok += 1,
            Err(ErreurCalcul::Math(_)) => seen_err += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        let ea = gen_expr(&mut a, 4);
        let eb = gen_expr(&mut b, 4);
        assert_eq!(ea, eb);

        let ra = evaluate(&ea, AngleMode::Deg).map(f64::to_bits);
        let rb = evaluate(&eb, AngleMode::Deg).map(f64::to_bits);
        assert_eq!(ra, rb, "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_imbrication_profonde_refusee_sans_debordement() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // bien au-delà de la limite : erreur propre, pas de débordement de pile
    let n = 50_000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert!(matches!(
        evaluate(&expr, AngleMode::Rad),
        Err(ErreurCalcul::TropProfond { .. })
    ));

    let fonctions = format!("{}1{}", "abs(".repeat(5_000), ")".repeat(5_000));
    assert!(matches!(
        evaluate(&fonctions, AngleMode::Rad),
        Err(ErreurCalcul::TropProfond { .. })
    ));

    budget(t0, max);
}

#[test]
fn fuzz_safe_chaines_plates_sans_limite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let somme = vec!["1"; 1000].join("+");
    assert_eq!(evaluate(&somme, AngleMode::Rad).unwrap(), 1000.0);

    let produit = vec!["1"; 1000].join("*");
    assert_eq!(evaluate(&produit, AngleMode::Rad).unwrap(), 1.0);

    let melange = vec!["2 * 3 - 5"; 1000].join(" + ");
    assert_eq!(evaluate(&melange, AngleMode::Deg).unwrap(), 1000.0);

    // très longue : parse, évaluation et libération sans récursion
    let chaine = vec!["1"; 50_000].join("+");
    assert_eq!(evaluate(&chaine, AngleMode::Rad).unwrap(), 50_000.0);

    budget(t0, max);
}

/// Pile de 2 Mio (thread de travail ordinaire) : au plafond, résultat ou erreur typée.
fn sur_petite_pile<F: FnOnce() + Send + 'static>(f: F) {
    thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn fuzz_safe_plafond_tient_sur_petite_pile() {
    sur_petite_pile(|| {
        let m = CalculatorEngine::with_max_depth(usize::MAX);
        assert_eq!(m.max_depth(), PROFONDEUR_PLAFOND);

        // n niveaux d’imbrication au total (le factor de tête compte pour 1)
        let n = PROFONDEUR_PLAFOND - 1;
        let formes = [
            (format!("{}1{}", "(".repeat(n), ")".repeat(n)), 1.0),
            (format!("{}1{}", "abs(".repeat(n), ")".repeat(n)), 1.0),
            (format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n)), 1.0),
            (format!("{}1{}", "1+(".repeat(n), ")".repeat(n)), (n + 1) as f64),
            (format!("{}1", "1^".repeat(n)), 1.0),
            (format!("{}1", "-".repeat(n)), -1.0),
        ];
        for (expr, attendu) in &formes {
            assert_eq!(m.evaluate(expr, AngleMode::Rad).unwrap(), *attendu);
        }

        // un niveau de plus : refus propre
        let n = PROFONDEUR_PLAFOND;
        for expr in [
            format!("{}1{}", "(".repeat(n), ")".repeat(n)),
            format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n)),
            format!("{}1", "1^".repeat(n)),
        ] {
            assert!(matches!(
                m.evaluate(&expr, AngleMode::Rad),
                Err(ErreurCalcul::TropProfond { .. })
            ));
        }
    });
}

#[test]
fn fuzz_safe_somme_balancee_sous_la_limite() {
    fn somme_balancee(terme: &str, n: usize) -> String {
        let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
        while items.len() > 1 {
            let mut next = Vec::new();
            for paire in items.chunks(2) {
                match paire {
                    [a, b] => next.push(format!("({a}+{b})")),
                    [a] => next.push(a.clone()),
                    _ => {}
                }
            }
            items = next;
        }
        items.pop().unwrap_or_else(|| "0".to_string())
    }

    // 800 termes, hauteur ~10 : bien sous la limite malgré la longueur
    let expr = somme_balancee("0.5", 800);
    assert_eq!(evaluate(&expr, AngleMode::Rad).unwrap(), 400.0);

    // juste sous une limite serrée
    let m = CalculatorEngine::with_max_depth(40);
    assert!(m.evaluate(&expr, AngleMode::Rad).is_ok());
}

/* ------------------------ Propriétés (proptest) ------------------------ */

proptest! {
    #[test]
    fn prop_precedence(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
        let expr = format!("{a} + {b} * {c}");
        let attendu = f64::from(a) + f64::from(b) * f64::from(c);
        prop_assert_eq!(evaluate(&expr, AngleMode::Rad).unwrap(), attendu);
    }

    #[test]
    fn prop_soustraction_gauche(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
        let expr = format!("{a} - {b} - {c}");
        let attendu = (f64::from(a) - f64::from(b)) - f64::from(c);
        prop_assert_eq!(evaluate(&expr, AngleMode::Rad).unwrap(), attendu);
    }

    #[test]
    fn prop_puissance_droite(a in 1i32..4, b in 0i32..3, c in 0i32..3) {
        let expr = format!("{a}^{b}^{c}");
        let attendu = f64::from(a).powf(f64::from(b).powf(f64::from(c)));
        prop_assert_eq!(evaluate(&expr, AngleMode::Rad).unwrap(), attendu);
    }

    #[test]
    fn prop_sin_asin(x in -1.0f64..=1.0) {
        let expr = format!("sin(asin({x}))");
        let v = evaluate(&expr, AngleMode::Rad).unwrap();
        prop_assert!((v - x).abs() < 1e-5, "{} -> {}", expr, v);
    }

    #[test]
    fn prop_entree_arbitraire_jamais_de_panique(s in "\\PC{0,40}") {
        // n’importe quelle chaîne : Ok ou erreur typée, jamais de panique
        let _ = evaluate(&s, AngleMode::Deg);
    }

    #[test]
    fn prop_alphabet_du_lexer(s in "[0-9+*/^().PIE -]{0,30}") {
        match evaluate(&s, AngleMode::Rad) {
            Ok(_)
            | Err(ErreurCalcul::Syntaxe { .. })
            | Err(ErreurCalcul::Math(_))
            | Err(ErreurCalcul::CaractereInvalide { .. }) => {}
            Err(e) => prop_assert!(false, "inattendu pour {:?}: {}", s, e),
        }
    }
}

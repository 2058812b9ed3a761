// [libs/domain/hitag2-attack/src/scorer.rs]
/*!
 * APARATO: CORRELATION SCORER
 * RESPONSABILIDAD: PUNTUAR CANDIDATOS PARCIALES POR VEROSIMILITUD
 *                   ACUMULADA CONTRA EL KEYSTREAM OBSERVADO
 *
 * El filtro no lineal nunca se evalúa sobre un candidato parcial (la
 * mayoría de sus bits de estado son aún desconocidos). En su lugar, cada
 * bit de keystream observado se compara contra
 * `hitag2_cipher::linear_approx`, que coincide con el filtro real con
 * probabilidad conocida `1 - epsilon`. Como la carga del estado inicial
 * y la retroalimentación son ambas lineales en GF(2) sobre los bits de
 * la clave (ver `hitag2_cipher::cipher`), el soporte de esa aproximación
 * lineal en el tiempo `t` -- el subconjunto exacto de bits de clave de
 * los que depende -- puede precalcularse una sola vez, independiente de
 * cualquier observación concreta. Un bit de salida está "listo" para un
 * candidato de longitud `k` tan pronto como todo su soporte cae dentro
 * de los primeros `k` bits de clave; la puntuación se acumula de forma
 * incremental, nunca recalculada desde cero.
 */

use hitag2_cipher::{load, Iv, Key, Uid};

use crate::error::AttackError;
use crate::observation::ObservationSet;

/// Soporte (en bits de clave) y umbral de "listo" de cada posición de
/// salida, compartidos por todas las observaciones.
struct DependencyPlan {
    /// `output_masks[t]`: XOR de las máscaras de las 20 posiciones de
    /// `FILTER_POSITIONS` en el tiempo `t`, como combinación lineal de
    /// los 48 bits iniciales de la clave.
    output_masks: Vec<u64>,
    /// `required_len[t]`: el `k` mínimo tal que `output_masks[t]` cae
    /// enteramente dentro de los primeros `k` bits de clave.
    required_len: Vec<u8>,
}

impl DependencyPlan {
    fn build(window: usize) -> Self {
        use hitag2_cipher::prelude::{FEEDBACK_TAPS, FILTER_POSITIONS};

        // `register_masks[p]` es la combinación lineal (como máscara XOR
        // sobre los 48 bits de clave) que produce el valor del bit de
        // registro en la posición `p` en el tiempo actual de la simulación.
        let mut register_masks: [u64; 48] = {
            let mut masks = [0u64; 48];
            for (i, slot) in masks.iter_mut().enumerate() {
                *slot = 1u64 << i;
            }
            masks
        };

        let mut output_masks = Vec::with_capacity(window);
        let mut required_len = Vec::with_capacity(window);

        for _ in 0..window {
            let mask = FILTER_POSITIONS
                .iter()
                .fold(0u64, |acc, &p| acc ^ register_masks[p as usize]);
            output_masks.push(mask);
            required_len.push(highest_set_bit(mask).map_or(0, |bit| bit + 1));

            let feedback_mask = FEEDBACK_TAPS
                .iter()
                .fold(0u64, |acc, &tap| acc ^ register_masks[tap as usize]);
            for i in (1..48).rev() {
                register_masks[i] = register_masks[i - 1];
            }
            register_masks[0] = feedback_mask;
        }

        Self { output_masks, required_len }
    }
}

fn highest_set_bit(mask: u64) -> Option<u8> {
    if mask == 0 {
        None
    } else {
        Some(63 - mask.leading_zeros() as u8)
    }
}

fn log_or_floor(probability: f64) -> f64 {
    let value = probability.ln();
    if value.is_finite() {
        value
    } else {
        f64::MIN / 2.0
    }
}

/// Sesgo de la aproximación lineal: la probabilidad con la que
/// `linear_approx` discrepa del filtro real `f`. Válido sólo en el
/// intervalo abierto `(0, 0.5)` -- en los extremos la aproximación deja
/// de aportar ninguna señal de correlación (en `0.5`) o se vuelve una
/// negación perfecta en vez de una aproximación (en `0` o por debajo).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epsilon(f64);

impl Epsilon {
    /// Valida `value` contra `(0, 0.5)`.
    pub fn new(value: f64) -> Result<Self, AttackError> {
        if value > 0.0 && value < 0.5 {
            Ok(Self(value))
        } else {
            Err(AttackError::InvalidEpsilon { epsilon: value })
        }
    }

    /// Valor de sesgo subyacente.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Puntuador de correlación: combina el plan de dependencias compartido
/// con el término constante (conocido) que cada observación aporta a la
/// aproximación lineal.
pub struct Scorer {
    plan: DependencyPlan,
    /// `constants[i][t]`: valor de la aproximación lineal evaluada sobre
    /// `load(clave=0, uid, iv_i)` evolucionado `t` pasos -- el término
    /// conocido que la clave real XOR-ea para producir el bit observado.
    constants: Vec<Vec<bool>>,
    log_match: f64,
    log_mismatch: f64,
}

impl Scorer {
    /// Construye el puntuador para un conjunto de observaciones y un uid
    /// compartido, validando `epsilon`.
    pub fn new(uid: Uid, observations: &ObservationSet, epsilon: f64) -> Result<Self, AttackError> {
        let epsilon = Epsilon::new(epsilon)?;
        let window = observations.window();
        let plan = DependencyPlan::build(window);
        let constants = observations
            .iter()
            .map(|observation| constant_track(uid, observation.iv, window))
            .collect();
        Ok(Self {
            plan,
            constants,
            log_match: log_or_floor(1.0 - epsilon.value()),
            log_mismatch: log_or_floor(epsilon.value()),
        })
    }

    /// Incremento de puntaje al extender un candidato de `old_len` a
    /// `new_len` bits conocidos de clave, contra todas las observaciones.
    ///
    /// Sólo recorre las posiciones de salida que se vuelven listas
    /// exactamente en este paso: nunca se recalcula un puntaje ya
    /// acumulado en un paso anterior.
    #[must_use]
    pub fn score_delta(&self, new_state: u64, old_len: u8, new_len: u8, observations: &ObservationSet) -> f64 {
        let mut delta = 0.0;
        for t in 0..observations.window() {
            let required = self.plan.required_len[t];
            if required > old_len && required <= new_len {
                let mask = self.plan.output_masks[t];
                let key_parity = (new_state & mask).count_ones() % 2 == 1;
                for (i, observation) in observations.iter().enumerate() {
                    let predicted = key_parity ^ self.constants[i][t];
                    let observed = observation.keystream[t];
                    delta += if predicted == observed { self.log_match } else { self.log_mismatch };
                }
            }
        }
        delta
    }

    /// El `k` mínimo a partir del cual toda posición de salida `0..w`
    /// está lista (la longitud en la que `score_delta` ya no tiene nada
    /// nuevo que sumar).
    #[must_use]
    pub fn fully_ready_length(&self) -> u8 {
        self.plan.required_len.iter().copied().max().unwrap_or(0)
    }
}

/// Evoluciona `load(clave=0, uid, iv)` a través de `window` pasos de
/// reloj y registra la aproximación lineal en cada uno -- el término
/// constante conocido que cada observación contribuye a la comparación.
fn constant_track(uid: Uid, iv: Iv, window: usize) -> Vec<bool> {
    use hitag2_cipher::{linear_approx, step};

    let mut state = load(Key::from_u64(0), uid, iv);
    let mut track = Vec::with_capacity(window);
    if window == 0 {
        return track;
    }
    track.push(linear_approx(state));
    for _ in 1..window {
        let (next_state, _) = step(state);
        state = next_state;
        track.push(linear_approx(state));
    }
    track
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;

    #[test]
    fn epsilon_rejects_its_own_boundary_values() {
        assert!(Epsilon::new(0.0).is_err());
        assert!(Epsilon::new(0.5).is_err());
        assert_eq!(Epsilon::new(0.3).unwrap().value(), 0.3);
    }

    #[test]
    fn rejects_epsilon_outside_open_interval() {
        let uid = Uid::new(1);
        let observations = ObservationSet::new(vec![Observation::new(Iv::new(1), vec![false; 48])], 32).unwrap();
        assert!(matches!(Scorer::new(uid, &observations, 0.0), Err(AttackError::InvalidEpsilon { .. })));
        assert!(matches!(Scorer::new(uid, &observations, 0.5), Err(AttackError::InvalidEpsilon { .. })));
        assert!(Scorer::new(uid, &observations, 0.3).is_ok());
    }

    #[test]
    fn dependency_plan_marks_every_position_eventually_ready() {
        let plan = DependencyPlan::build(8);
        assert!(plan.required_len.iter().all(|&len| len <= 48));
    }

    #[test]
    fn score_delta_is_zero_when_nothing_becomes_ready() {
        let uid = Uid::new(42);
        let observations = ObservationSet::new(vec![Observation::new(Iv::new(7), vec![true; 48])], 48).unwrap();
        let scorer = Scorer::new(uid, &observations, 0.3).unwrap();
        // Position 0 always requires a fairly high `k` (FILTER_POSITIONS spans
        // up to index 46), so extending from 1 to 2 bits should not unlock it.
        let delta = scorer.score_delta(0b11, 1, 2, &observations);
        if scorer.plan.required_len.iter().all(|&len| len > 2) {
            assert_eq!(delta, 0.0);
        }
    }

    #[test]
    fn recognizing_the_true_key_scores_higher_than_a_random_guess() {
        let key = Key::from_u64(0x0BAD_F00D_CAFE);
        let uid = Uid::new(0x1111_2222);
        let iv = Iv::new(0x3333_4444);
        let keystream = hitag2_cipher::keystream(key, uid, iv, 40);
        let observations = ObservationSet::new(vec![Observation::new(iv, keystream)], 40).unwrap();
        let scorer = Scorer::new(uid, &observations, 0.296_875).unwrap();
        let ready = scorer.fully_ready_length();

        let true_score = scorer.score_delta(key.value(), 0, ready, &observations);
        let wrong_score = scorer.score_delta(key.value() ^ 1, 0, ready, &observations);
        assert!(true_score >= wrong_score);
    }
}

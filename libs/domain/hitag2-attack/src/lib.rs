// [libs/domain/hitag2-attack/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: HITAG2 FAST CORRELATION KEY RECOVERY
 * CLASIFICACIÓN: DOMAIN ENGINE (ESTRATO L2)
 * RESPONSABILIDAD: RECUPERAR LA CLAVE DE 48 BITS DE HITAG2 POR BÚSQUEDA
 *                   EN HAZ DE ENCUENTRO-EN-EL-MEDIO SOBRE EL ESTADO
 *                   INICIAL, GUIADA POR CORRELACIÓN
 *
 * `recover_key` es el único punto de entrada público. Orquesta, en
 * orden: validación de `AttackConfig`, construcción del `ObservationSet`,
 * precómputo del `Scorer`, construcción del `Dispatcher` (un
 * `rayon::ThreadPool` dedicado a esta corrida), 48 pasos de
 * `beam::advance_one_bit`, y una pasada final de `verifier::verify_all`.
 * Ningún estado sobrevive entre llamadas: el `ThreadPool` del dispatcher
 * se descarta al retornar.
 * =================================================================
 */

/// Máquina de estados de un paso del haz (`Extending` -> `Scoring` ->
/// `Pruning` -> `Advanced`).
pub mod beam;
/// Representación de candidato parcial y su arena de doble búfer.
pub mod candidate;
/// Distribución paralela de extensión y puntuación sobre un `rayon::ThreadPool`.
pub mod dispatcher;
/// Taxonomía de errores de `recover_key`.
pub mod error;
/// Conjunto inmutable de observaciones (IV, keystream).
pub mod observation;
/// Puntuador de correlación incremental.
pub mod scorer;
/// Confirmación bit-exacta del candidato ganador.
pub mod verifier;

use hitag2_cipher::prelude::STATE_BITS;
use hitag2_cipher::{Key, Uid};
use tracing::instrument;

pub use candidate::{Beam, Candidate};
pub use error::AttackError;
pub use observation::{Observation, ObservationSet};
pub use scorer::Epsilon;

/// Parámetros de sintonía de una corrida de `recover_key`.
#[derive(Debug, Clone, Copy)]
pub struct AttackConfig {
    /// Ancho del haz: número máximo de candidatos retenidos por paso.
    pub t: u32,
    /// Hilos dedicados al dispatcher; `0` cae en `num_cpus::get()`.
    pub workers: u32,
    /// Probabilidad de que la aproximación lineal discrepe del filtro real.
    pub epsilon: f64,
    /// Ventana de bits de keystream considerada por observación.
    pub w: u32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self { t: 800_000, workers: 0, epsilon: 0.296_875, w: 32 }
    }
}

/// Recupera la clave de 48 bits compartida por `uid` a partir de
/// `observations`, o reporta por qué no pudo hacerlo.
///
/// Único punto de entrada público del motor. Rechaza configuraciones
/// inválidas de inmediato, antes de reservar ningún búfer del haz.
#[instrument(skip(observations, config), fields(t = config.t, n = observations.len()))]
pub fn recover_key(uid: Uid, observations: Vec<Observation>, config: AttackConfig) -> Result<Key, AttackError> {
    if config.t < 2 {
        return Err(AttackError::InvalidT { t: config.t });
    }

    let observation_set = ObservationSet::new(observations, config.w as usize)?;
    let active_scorer = scorer::Scorer::new(uid, &observation_set, config.epsilon)?;
    let dispatcher = dispatcher::Dispatcher::new(config.workers)?;
    let mut beam = Beam::new(config.t as usize);

    for _ in 0..STATE_BITS {
        beam::advance_one_bit(&mut beam, &dispatcher, &active_scorer, &observation_set, config.t as usize);
    }

    verifier::verify_all(beam.current(), uid, &observation_set).ok_or(AttackError::NoKeyFound)
}

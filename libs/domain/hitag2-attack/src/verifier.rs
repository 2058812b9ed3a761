// [libs/domain/hitag2-attack/src/verifier.rs]
/*!
 * APARATO: VERIFIER
 * RESPONSABILIDAD: CONFIRMAR EL PRIMER CANDIDATO QUE REPRODUCE TODAS LAS
 *                   OBSERVACIONES BIT A BIT
 *
 * El puntuador es probabilístico; el verificador no lo es. Recorre el
 * haz final en el mismo orden (puntaje descendente, luego estado
 * ascendente) que usa la poda, y acepta el primer candidato cuyo
 * keystream completo -- generado por el cifrador real, no por la
 * aproximación lineal -- coincide con cada observación. La comparación
 * usa la longitud completa de cada observación cuando está disponible,
 * y cae a la ventana efectiva `w` sólo como mínimo (una observación más
 * corta que `w` nunca ocurre: `ObservationSet` ya recorta `w` a la más
 * corta de todas). Ningún candidato se reintenta tras una discrepancia
 * parcial.
 */

use hitag2_cipher::{keystream, Key, Uid};
use tracing::instrument;

use crate::candidate::{candidate_order, Candidate};
use crate::observation::ObservationSet;

/// Recorre `final_beam` en orden (puntaje desc, estado asc) y devuelve la
/// primera `Key` cuyo keystream reproduce toda observación, usando la
/// longitud completa de cada una cuando está disponible y `w` sólo como
/// mínimo.
#[instrument(skip(final_beam, observations), fields(candidates = final_beam.len()))]
pub fn verify_all(final_beam: &[Candidate], uid: Uid, observations: &ObservationSet) -> Option<Key> {
    let mut ordered: Vec<&Candidate> = final_beam.iter().collect();
    ordered.sort_by(|a, b| candidate_order(a, b));

    ordered.into_iter().find_map(|candidate| {
        let key = Key::from_u64(candidate.state);
        if matches_every_observation(key, uid, observations) {
            Some(key)
        } else {
            None
        }
    })
}

fn matches_every_observation(key: Key, uid: Uid, observations: &ObservationSet) -> bool {
    observations.iter().all(|observation| {
        // `ObservationSet::new` already caps `w` to the shortest observation,
        // so every observation's own length is at least `w`; comparing the
        // full length is always at least as strict as comparing just `w`.
        let predicted = keystream(key, uid, observation.iv, observation.keystream.len());
        predicted == observation.keystream
    })
}

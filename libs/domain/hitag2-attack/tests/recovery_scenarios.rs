// [libs/domain/hitag2-attack/tests/recovery_scenarios.rs]
//! Escenarios de recuperación de clave extremo a extremo.
//!
//! Cada escenario fabrica su propio `(key, uid, iv)` localmente y genera
//! observaciones llamando a `hitag2_cipher::keystream` directamente --
//! no hay simulador ni E/S de archivos, ambos fuera del alcance de este
//! motor. El ancho del haz `T` necesario aquí es modesto porque el costo
//! de la búsqueda lo domina `T`, no el tamaño del espacio de claves de 48
//! bits: el haz nunca retiene más de `2T` candidatos en ningún paso, sin
//! importar qué tan grande sea el espacio de búsqueda subyacente.

use hitag2_attack::scorer::Scorer;
use hitag2_attack::{recover_key, AttackConfig, AttackError, Observation, ObservationSet};
use hitag2_cipher::{keystream, Iv, Key, Uid};

fn observe(key: Key, uid: Uid, iv: Iv, len: usize) -> Observation {
    Observation::new(iv, keystream(key, uid, iv, len))
}

/// Flujo de bits determinista con apariencia de ruido, sin ninguna
/// relación con el cifrador: sirve para fabricar observaciones que no
/// corresponden a ninguna clave real.
fn noise_bits(mut state: u64, len: usize) -> Vec<bool> {
    state |= 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state & 1 == 1
        })
        .collect()
}

#[test]
fn recovers_the_mikron_demo_key_from_a_single_observation() {
    let key = Key::from_be_bytes(*b"MIKRON");
    let uid = Uid::new(0x1234_5678);
    let iv = Iv::new(0xDEAD_BEEF);
    let observations = vec![observe(key, uid, iv, 48)];

    let config = AttackConfig { t: 256, w: 32, ..AttackConfig::default() };
    let recovered = recover_key(uid, observations, config).unwrap();
    assert_eq!(recovered, key);
}

#[test]
fn recovers_a_key_from_multiple_observations_under_distinct_ivs() {
    let key = Key::from_u64(0x0BAD_F00D_CAFE);
    let uid = Uid::new(0xAAAA_BBBB);
    let ivs = [Iv::new(1), Iv::new(2), Iv::new(3)];
    let observations: Vec<Observation> = ivs.iter().map(|&iv| observe(key, uid, iv, 40)).collect();

    let config = AttackConfig { t: 256, w: 32, ..AttackConfig::default() };
    let recovered = recover_key(uid, observations, config).unwrap();
    assert_eq!(recovered, key);
}

#[test]
fn a_beam_too_narrow_can_report_no_key_found() {
    let key = Key::from_u64(0x0102_0304_0506);
    let uid = Uid::new(0x5555_6666);
    let iv = Iv::new(0x7777_8888);
    let observations = vec![observe(key, uid, iv, 40)];

    // T = 2 is pathologically narrow: the beam is expected to lose the true
    // partial candidate to pruning at some point before all 48 bits are fixed.
    let config = AttackConfig { t: 2, w: 32, ..AttackConfig::default() };
    let result = recover_key(uid, observations, config);
    assert!(matches!(result, Ok(found) if found == key) || result == Err(AttackError::NoKeyFound));
}

#[test]
fn rejects_an_empty_observation_set_before_searching() {
    let uid = Uid::new(1);
    let config = AttackConfig::default();
    let result = recover_key(uid, Vec::new(), config);
    assert_eq!(result.unwrap_err(), AttackError::NoObservations);
}

#[test]
fn rejects_epsilon_outside_its_valid_range() {
    let uid = Uid::new(1);
    let observations = vec![observe(Key::from_u64(1), uid, Iv::new(1), 32)];
    let config = AttackConfig { epsilon: 0.9, ..AttackConfig::default() };
    let result = recover_key(uid, observations, config);
    assert_eq!(result.unwrap_err(), AttackError::InvalidEpsilon { epsilon: 0.9 });
}

#[test]
fn a_single_corrupted_bit_still_leaves_the_true_key_ahead_in_the_correlation_score() {
    // The verifier demands a bit-exact match against every observation
    // (see `verifier::matches_every_observation`), so a literally corrupted
    // keystream bit can never pass verification, however wide the beam is.
    // The tolerance this scenario is actually about lives in the scorer: the
    // true key's aggregate correlation score should still dominate a wrong
    // key's despite one flipped input bit. See DESIGN.md for the full
    // resolution of this tension between the scenario and the verifier's
    // exact-match contract.
    let key = Key::from_u64(0x4F4E4D494B52);
    let uid = Uid::new(0xAABB_CCDD);
    let mut observations: Vec<Observation> =
        (0..16u32).map(|i| observe(key, uid, Iv::new(0x9000_0000 + i), 32)).collect();
    observations[3].keystream[5] = !observations[3].keystream[5];

    let observation_set = ObservationSet::new(observations, 32).unwrap();
    let scorer = Scorer::new(uid, &observation_set, 0.296_875).unwrap();
    let ready = scorer.fully_ready_length();

    let true_score = scorer.score_delta(key.value(), 0, ready, &observation_set);
    let wrong_score = scorer.score_delta(key.value() ^ 1, 0, ready, &observation_set);
    assert!(true_score > wrong_score);
}

#[test]
fn uniform_random_keystreams_report_no_key_found() {
    let uid = Uid::new(0x2468_1357);
    let observations: Vec<Observation> = (0..16u64)
        .map(|i| {
            let iv = Iv::new(0x1000_0000 + i as u32);
            Observation::new(iv, noise_bits(0xD1B5_4A32_0000_0000 ^ i, 32))
        })
        .collect();

    let config = AttackConfig { t: 64, w: 32, ..AttackConfig::default() };
    let result = recover_key(uid, observations, config);
    assert_eq!(result.unwrap_err(), AttackError::NoKeyFound);
}

#[test]
fn a_shorter_window_than_the_observation_still_recovers_the_key() {
    let key = Key::from_u64(0x1122_3344_5566);
    let uid = Uid::new(0x9999_0000);
    let iv = Iv::new(0x1212_3434);
    // The observation carries 64 bits but the configured window is 32; the
    // effective window derived by `ObservationSet` should cap at 32.
    let observations = vec![observe(key, uid, iv, 64)];
    let config = AttackConfig { t: 256, w: 32, ..AttackConfig::default() };
    let recovered = recover_key(uid, observations, config).unwrap();
    assert_eq!(recovered, key);
}

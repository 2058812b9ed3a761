// [libs/core/hitag2-cipher/src/cipher.rs]
/*!
 * APARATO: CIPHER ENTRY POINTS (LOAD / KEYSTREAM)
 * RESPONSABILIDAD: CARGA DE ESTADO INICIAL Y GENERACIÓN DE FLUJO
 *
 * `load` combina la clave con una constante pública derivada de
 * (uid, iv) mediante XOR: `state_init = key XOR diffuse(uid, iv)`.
 * `diffuse` sólo usa la retroalimentación lineal del registro (nunca el
 * filtro no lineal), así que toda la cadena clave -> estado inicial ->
 * flujo de salida permanece lineal en los bits de la clave. Esta es la
 * propiedad que hace exacto el análisis de dependencias del motor de
 * correlación (`hitag2_attack::scorer`): el soporte de cada bit de
 * salida, visto como combinación XOR de bits de `state_init`, es
 * idéntico al soporte visto como combinación de bits de la clave.
 *
 * Una variante que absorbiera la clave a través del filtro no lineal
 * rompería esa linealidad; por eso `diffuse` nunca invoca `f`.
 */

use crate::feedback::{feedback_bit, step};
use crate::filter::f;
use crate::key::{Iv, Key, Uid};
use crate::state::clamp;

/// Difunde `(uid, iv)` en una constante pública de 48 bits, independiente
/// de la clave, usando sólo la retroalimentación lineal del registro.
fn diffuse(uid: Uid, iv: Iv) -> u64 {
    let mut state = u64::from(uid.value);
    for i in 0..32 {
        let bit = feedback_bit(state) ^ ((uid.value >> (i % 32)) & 1 == 1);
        state = clamp((state << 1) | bit as u64);
    }
    state ^= u64::from(iv.value);
    for i in 0..32 {
        let bit = feedback_bit(state) ^ ((iv.value >> (i % 32)) & 1 == 1);
        state = clamp((state << 1) | bit as u64);
    }
    state
}

/// Carga el estado inicial del cifrador a partir de `(key, uid, iv)`.
///
/// Determinista y total: no hay entradas inválidas posibles a este
/// nivel.
#[must_use]
pub fn load(key: Key, uid: Uid, iv: Iv) -> u64 {
    key.value() ^ diffuse(uid, iv)
}

/// Genera los primeros `n` bits de keystream para `(key, uid, iv)`.
///
/// El primer bit es `f(state_init)`; los siguientes provienen de
/// reloj-y-reevaluación sucesivos de `step`.
#[must_use]
pub fn keystream(key: Key, uid: Uid, iv: Iv, n: usize) -> Vec<bool> {
    let mut state = load(key, uid, iv);
    let mut out = Vec::with_capacity(n);
    if n == 0 {
        return out;
    }
    out.push(f(state));
    for _ in 1..n {
        let (next_state, bit) = step(state);
        state = next_state;
        out.push(bit);
    }
    out
}

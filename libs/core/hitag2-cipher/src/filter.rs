// [libs/core/hitag2-cipher/src/filter.rs]
/*!
 * APARATO: NONLINEAR OUTPUT FILTER
 * RESPONSABILIDAD: COMBINAR 20 BITS DE ESTADO EN UN BIT DE SALIDA
 *
 * `f` se construye en dos capas: cuatro instancias de `fa`/`fb` sobre
 * fragmentos disjuntos de 4 bits producen cuatro bits intermedios, que
 * se perturban por XOR con cuatro bits adicionales del estado antes de
 * entrar en la combinación final `fc`. Esto cubre exactamente las 20
 * posiciones de `FILTER_POSITIONS`.
 */

use crate::constants::{FA_TABLE, FB_TABLE, FC_TABLE, FILTER_POSITIONS};
use crate::state::bit_at;

#[inline(always)]
fn lookup4(table: &[u8; 16], bits: [bool; 4]) -> bool {
    let index = (bits[0] as usize) | (bits[1] as usize) << 1 | (bits[2] as usize) << 2 | (bits[3] as usize) << 3;
    table[index] != 0
}

#[inline(always)]
fn fa(bits: [bool; 4]) -> bool {
    lookup4(&FA_TABLE, bits)
}

#[inline(always)]
fn fb(bits: [bool; 4]) -> bool {
    lookup4(&FB_TABLE, bits)
}

#[inline(always)]
fn fc(bits: [bool; 4]) -> bool {
    lookup4(&FC_TABLE, bits)
}

/// Evalúa la función de filtro no lineal sobre el estado dado.
#[must_use]
pub fn f(state: u64) -> bool {
    let p = FILTER_POSITIONS;
    let slot = |i: usize| [
        bit_at(state, p[4 * i]),
        bit_at(state, p[4 * i + 1]),
        bit_at(state, p[4 * i + 2]),
        bit_at(state, p[4 * i + 3]),
    ];

    let s0 = fa(slot(0));
    let s1 = fb(slot(1));
    let s2 = fb(slot(2));
    let s3 = fa(slot(3));

    let extra = slot(4);
    fc([s0 ^ extra[0], s1 ^ extra[1], s2 ^ extra[2], s3 ^ extra[3]])
}

/// Aproximación lineal de `f`: el XOR de los 20 bits de `FILTER_POSITIONS`,
/// sin pasar por ninguna de las tablas de verdad no lineales.
///
/// El atacante de correlación nunca evalúa `f` directamente sobre un
/// candidato parcial (la mayoría de sus bits de estado son aún
/// desconocidos); en su lugar compara el keystream observado contra esta
/// aproximación lineal, que coincide con `f` con una probabilidad sesgada
/// conocida (`1 - epsilon`, ver `hitag2_attack::scorer`).
#[must_use]
pub fn linear_approx(state: u64) -> bool {
    FILTER_POSITIONS.iter().fold(false, |acc, &pos| acc ^ bit_at(state, pos))
}

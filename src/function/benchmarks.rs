//! # Benchmark Objectives
//!
//! Classic continuous test functions for exercising the driver on
//! function minimization. All are minimization problems; sphere, ellipsoid,
//! zakharov, ackley, griewangk and rastrigin attain 0 at the origin,
//! rosenbrock at the all-ones point.

use std::f64::consts::{E, PI};

pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

pub fn ellipsoid(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    x.iter()
        .enumerate()
        .map(|(i, v)| 10f64.powf(6.0 * i as f64 / (n - 1.0)) * v * v)
        .sum()
}

pub fn zakharov(x: &[f64]) -> f64 {
    let s1: f64 = x.iter().map(|v| v * v).sum();
    let s2: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| 0.5 * (i as f64 + 1.0) * v)
        .sum();
    s1 + s2.powi(2) + s2.powi(4)
}

pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| (1.0 - w[0]).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2))
        .sum()
}

pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let s1: f64 = x.iter().map(|v| v * v).sum();
    let s2: f64 = x.iter().map(|v| (2.0 * PI * v).cos()).sum();
    -20.0 * (-0.2 * (s1 / n).sqrt()).exp() - (s2 / n).exp() + 20.0 + E
}

pub fn griewangk(x: &[f64]) -> f64 {
    let s1: f64 = x.iter().map(|v| v * v / 4000.0).sum();
    let m1: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i as f64 + 1.0).sqrt())).cos())
        .product();
    s1 - m1 + 1.0
}

pub fn rastrigin(x: &[f64]) -> f64 {
    let s1: f64 = x
        .iter()
        .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
        .sum();
    10.0 * x.len() as f64 + s1
}

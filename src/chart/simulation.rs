//! Physics relaxation that packs bubbles on the chart surface.
//!
//! Each tick applies, in order: a many-body charge between every pair of
//! bubbles, a centering shift, and a collision push that keeps bubbles
//! `padding` apart. Alpha cools geometrically from 1 to `ALPHA_MIN` over
//! roughly 300 ticks, after which the layout is considered settled.

use crate::chart::node::Node;
use crate::hash::{hash3, jiggle};
use glam::DVec2;
use rayon::prelude::*;

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_DECAY: f64 = 0.4;
const DISTANCE_MIN_SQUARED: f64 = 1.0;
const COLLIDE_PADDING: f64 = 2.0;
/// Upper bound on ticks run by `settle`, in case alpha is reheated
const MAX_SETTLE_TICKS: usize = 1000;

pub struct Simulation {
    nodes: Vec<Node>,
    alpha: f64,
    alpha_decay: f64,
    alpha_target: f64,
    /// Many-body strength; positive pulls bubbles together
    strength: f64,
    center: DVec2,
    ticks: u64,
}

impl Simulation {
    pub fn new(nodes: Vec<Node>, strength: f64, width: f64, height: f64) -> Self {
        Self {
            nodes,
            alpha: 1.0,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
            alpha_target: 0.0,
            strength,
            center: DVec2::new(width / 2.0, height / 2.0),
            ticks: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < ALPHA_MIN
    }

    /// Advance one step. Returns false once the layout has settled.
    pub fn tick(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        self.ticks += 1;

        self.apply_charge();
        self.apply_center();
        self.apply_collide();

        for node in &mut self.nodes {
            node.vel *= 1.0 - VELOCITY_DECAY;
            node.pos += node.vel;
        }

        if self.is_settled() {
            tracing::debug!(ticks = self.ticks, nodes = self.nodes.len(), "bubble layout settled");
        }
        true
    }

    /// Run up to `n` ticks, stopping early once settled
    pub fn step(&mut self, n: usize) {
        for _ in 0..n {
            if !self.tick() {
                break;
            }
        }
    }

    /// Run until settled
    pub fn settle(&mut self) {
        self.step(MAX_SETTLE_TICKS);
    }

    fn apply_charge(&mut self) {
        let k = self.strength * self.alpha;
        if k == 0.0 || self.nodes.len() < 2 {
            return;
        }

        let positions: Vec<DVec2> = self.nodes.iter().map(|n| n.pos).collect();
        let tick = self.ticks;

        let deltas: Vec<DVec2> = positions
            .par_iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut dv = DVec2::ZERO;
                for (j, &q) in positions.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let mut d = q - p;
                    if d.x == 0.0 {
                        d.x = jiggle(hash3(i as u64, j as u64, tick));
                    }
                    if d.y == 0.0 {
                        d.y = jiggle(hash3(j as u64, i as u64, tick));
                    }
                    let mut l = d.length_squared();
                    if l < DISTANCE_MIN_SQUARED {
                        l = (DISTANCE_MIN_SQUARED * l).sqrt();
                    }
                    dv += d * (k / l);
                }
                dv
            })
            .collect();

        for (node, dv) in self.nodes.iter_mut().zip(deltas) {
            node.vel += dv;
        }
    }

    fn apply_center(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let sum: DVec2 = self.nodes.iter().map(|n| n.pos).sum();
        let shift = sum / self.nodes.len() as f64 - self.center;
        for node in &mut self.nodes {
            node.pos -= shift;
        }
    }

    /// Pairwise overlap resolution on velocity-predicted positions.
    /// The smaller bubble of a pair moves further.
    fn apply_collide(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            let ri = self.nodes[i].radius + COLLIDE_PADDING;
            let ri2 = ri * ri;
            let predicted = self.nodes[i].pos + self.nodes[i].vel;

            for j in (i + 1)..n {
                let rj = self.nodes[j].radius + COLLIDE_PADDING;
                let r = ri + rj;
                let mut d = predicted - self.nodes[j].pos - self.nodes[j].vel;
                let mut l = d.length_squared();
                if l >= r * r {
                    continue;
                }

                if d.x == 0.0 {
                    d.x = jiggle(hash3(i as u64, j as u64, self.ticks ^ 0xc011));
                    l += d.x * d.x;
                }
                if d.y == 0.0 {
                    d.y = jiggle(hash3(j as u64, i as u64, self.ticks ^ 0xc011));
                    l += d.y * d.y;
                }

                let l_sqrt = l.sqrt();
                let push = d * ((r - l_sqrt) / l_sqrt);
                let rj2 = rj * rj;
                let share = rj2 / (ri2 + rj2);

                self.nodes[i].vel += push * share;
                self.nodes[j].vel -= push * (1.0 - share);
            }
        }
    }
}

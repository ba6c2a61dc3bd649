/*!
 * Core Types
 * Common types used across the simulator
 */

/// Simulation clock value, in ticks
pub type Tick = u64;

/// Priority band index (1 = highest priority)
pub type Band = usize;

//! Driver descriptors and their running state.
//!
//! A [`Driver`] is a plain description ("go to 1 over 300ms", "repeat this
//! forever"). The store turns it into a [`Running`] anchored at the
//! parameter's current value, and advances that once per frame.

use std::collections::VecDeque;
use std::time::Duration;

use super::easing::Easing;
use super::spring::{SpringConfig, SpringMotion};

/// How a parameter's value evolves over time.
#[derive(Debug, Clone, PartialEq)]
pub enum Driver {
    /// Move to `to` over `duration`, shaped by `easing`.
    Timing {
        to: f32,
        duration: Duration,
        easing: Easing,
    },
    /// Spring toward `to` until settled.
    Spring { to: f32, config: SpringConfig },
    /// Hold the current value.
    Delay(Duration),
    /// Run each step to completion, in order.
    Sequence { steps: Vec<Driver>, notify: bool },
    /// Replay `driver`; `count: None` repeats forever.
    Repeat {
        driver: Box<Driver>,
        count: Option<u32>,
        reverse: bool,
    },
}

impl Driver {
    pub fn timing(to: f32, duration: Duration) -> Self {
        Self::timing_with(to, duration, Easing::default())
    }

    pub fn timing_with(to: f32, duration: Duration, easing: Easing) -> Self {
        Self::Timing {
            to,
            duration,
            easing,
        }
    }

    pub fn spring(to: f32, config: SpringConfig) -> Self {
        Self::Spring { to, config }
    }

    pub fn delay(duration: Duration) -> Self {
        Self::Delay(duration)
    }

    pub fn sequence(steps: Vec<Driver>) -> Self {
        Self::Sequence {
            steps,
            notify: false,
        }
    }

    /// Repeat forever. With `reverse`, every other cycle runs back toward the
    /// value the loop started from (ping-pong); otherwise each cycle restarts
    /// from that value.
    pub fn repeat(driver: Driver, reverse: bool) -> Self {
        Self::Repeat {
            driver: Box::new(driver),
            count: None,
            reverse,
        }
    }

    /// Ask the store for a [`Completion`](super::Completion) when this driver
    /// finishes. Non-sequence drivers are wrapped in a one-step sequence.
    pub fn notify_on_complete(self) -> Self {
        match self {
            Self::Sequence { steps, .. } => Self::Sequence {
                steps,
                notify: true,
            },
            other => Self::Sequence {
                steps: vec![other],
                notify: true,
            },
        }
    }

    /// Whether finishing this driver produces a completion.
    pub fn notifies(&self) -> bool {
        matches!(self, Self::Sequence { notify: true, .. })
    }

    /// Total run time, if known ahead of time. Springs and infinite repeats
    /// have none.
    pub fn nominal_duration(&self) -> Option<Duration> {
        match self {
            Self::Timing { duration, .. } | Self::Delay(duration) => Some(*duration),
            Self::Spring { .. } => None,
            Self::Sequence { steps, .. } => steps
                .iter()
                .try_fold(Duration::ZERO, |acc, step| Some(acc + step.nominal_duration()?)),
            Self::Repeat { driver, count, .. } => {
                let cycles = (*count)?;
                Some(driver.nominal_duration()? * cycles)
            }
        }
    }

    /// Copy of this driver whose final destination is `to`.
    fn retarget(&self, to: f32) -> Self {
        match self {
            Self::Timing {
                duration, easing, ..
            } => Self::Timing {
                to,
                duration: *duration,
                easing: *easing,
            },
            Self::Spring { config, .. } => Self::Spring {
                to,
                config: *config,
            },
            Self::Delay(duration) => Self::Delay(*duration),
            Self::Sequence { steps, notify } => {
                let mut steps = steps.clone();
                if let Some(last) = steps.last_mut() {
                    *last = last.retarget(to);
                }
                Self::Sequence {
                    steps,
                    notify: *notify,
                }
            }
            Self::Repeat {
                driver,
                count,
                reverse,
            } => Self::Repeat {
                driver: Box::new(driver.retarget(to)),
                count: *count,
                reverse: *reverse,
            },
        }
    }
}

/// A driver in flight.
#[derive(Debug)]
pub(crate) enum Running {
    Timing {
        from: f32,
        to: f32,
        duration: Duration,
        easing: Easing,
        elapsed: Duration,
    },
    Spring(SpringMotion),
    Delay {
        remaining: Duration,
    },
    Sequence {
        current: Box<Running>,
        pending: VecDeque<Driver>,
    },
    Repeat {
        template: Driver,
        reverse: bool,
        cycles_left: Option<u32>,
        origin: f32,
        forward: bool,
        current: Box<Running>,
    },
}

impl Running {
    /// Anchor `driver` at the parameter's current `value`.
    pub(crate) fn start(driver: Driver, value: f32) -> Self {
        match driver {
            Driver::Timing {
                to,
                duration,
                easing,
            } => Self::Timing {
                from: value,
                to,
                duration,
                easing,
                elapsed: Duration::ZERO,
            },
            Driver::Spring { to, config } => Self::Spring(SpringMotion::new(to, config)),
            Driver::Delay(duration) => Self::Delay {
                remaining: duration,
            },
            Driver::Sequence { steps, .. } => {
                let mut pending: VecDeque<Driver> = steps.into();
                match pending.pop_front() {
                    Some(first) => Self::Sequence {
                        current: Box::new(Self::start(first, value)),
                        pending,
                    },
                    None => Self::Delay {
                        remaining: Duration::ZERO,
                    },
                }
            }
            Driver::Repeat {
                driver,
                count,
                reverse,
            } => {
                if count == Some(0) {
                    return Self::Delay {
                        remaining: Duration::ZERO,
                    };
                }
                let template = *driver;
                Self::Repeat {
                    current: Box::new(Self::start(template.clone(), value)),
                    template,
                    reverse,
                    cycles_left: count,
                    origin: value,
                    forward: true,
                }
            }
        }
    }

    /// Advance by `dt`, writing into `value`.
    ///
    /// Returns `Some(leftover)` when the driver has finished, carrying the
    /// part of `dt` it did not use, or `None` while it still runs.
    pub(crate) fn advance(&mut self, value: &mut f32, dt: Duration) -> Option<Duration> {
        match self {
            Self::Timing {
                from,
                to,
                duration,
                easing,
                elapsed,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    *value = *to;
                    return Some(*elapsed - *duration);
                }
                let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
                *value = *from + (*to - *from) * easing.apply(progress);
                None
            }
            Self::Spring(motion) => motion.advance(value, dt),
            Self::Delay { remaining } => {
                if dt >= *remaining {
                    let leftover = dt - *remaining;
                    *remaining = Duration::ZERO;
                    Some(leftover)
                } else {
                    *remaining -= dt;
                    None
                }
            }
            Self::Sequence { current, pending } => {
                let mut rest = dt;
                loop {
                    let leftover = current.advance(value, rest)?;
                    match pending.pop_front() {
                        Some(next) => {
                            **current = Self::start(next, *value);
                            rest = leftover;
                        }
                        None => return Some(leftover),
                    }
                }
            }
            Self::Repeat {
                template,
                reverse,
                cycles_left,
                origin,
                forward,
                current,
            } => {
                let mut rest = dt;
                loop {
                    let leftover = current.advance(value, rest)?;
                    if let Some(left) = cycles_left {
                        if *left <= 1 {
                            return Some(leftover);
                        }
                        *left -= 1;
                    }
                    if *reverse {
                        *forward = !*forward;
                        let next = if *forward {
                            template.clone()
                        } else {
                            template.retarget(*origin)
                        };
                        **current = Self::start(next, *value);
                    } else {
                        *value = *origin;
                        **current = Self::start(template.clone(), *origin);
                    }
                    // A cycle that used no time would spin forever; resume next frame.
                    if leftover == rest {
                        return None;
                    }
                    rest = leftover;
                }
            }
        }
    }
}

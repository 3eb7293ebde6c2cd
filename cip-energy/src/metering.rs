//! Cyclic metering state machine
//!
//! The management loop calls [`MeteringCycle::run_cycle`] once per
//! cycle. While metering, the cycle pulls the measured watt-hour delta
//! from the application's [`EnergySource`] and feeds it into the
//! odometers. Starting and Stopping are transitional states; the
//! source signals when the transition work has finished.

use crate::base_energy::BaseEnergyObject;
use cip_core::{CipError, CipResult};
use cip_object::CipObject;
use log::info;
use std::sync::Arc;

/// Data status value reported while the instance is totalizing
pub const DATA_STATUS_METERING: u16 = 0;

/// Data status value reported while the instance is not totalizing
pub const DATA_STATUS_NOT_METERING: u16 = 1;

/// State of the metering process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteringState {
    NotMetering,
    Starting,
    Metering,
    Stopping,
}

/// Application-provided measurement source
#[async_trait::async_trait]
pub trait EnergySource: Send + Sync {
    /// Signed watt-hour delta measured over the elapsed cycle; positive
    /// for net consumption, negative for net production
    async fn sample_wh(&mut self) -> i64;

    /// Whether a pending start has finished its application-side work
    async fn starting_done(&mut self) -> bool {
        true
    }

    /// Whether a pending stop has finished its application-side work
    async fn stopping_done(&mut self) -> bool {
        true
    }
}

/// Drives one Base Energy instance from the cyclic management loop
pub struct MeteringCycle<S> {
    object: Arc<BaseEnergyObject>,
    source: S,
    state: MeteringState,
}

impl<S: EnergySource> MeteringCycle<S> {
    /// Create a cycle driver; metering is initially stopped
    pub fn new(object: Arc<BaseEnergyObject>, source: S) -> Self {
        Self {
            object,
            source,
            state: MeteringState::NotMetering,
        }
    }

    /// Current state
    pub fn state(&self) -> MeteringState {
        self.state
    }

    /// Request the transition into metering
    pub fn start(&mut self) -> CipResult<()> {
        match self.state {
            MeteringState::NotMetering => {
                self.state = MeteringState::Starting;
                Ok(())
            }
            other => Err(CipError::InvalidData(format!(
                "Cannot start metering from state {:?}",
                other
            ))),
        }
    }

    /// Request the transition out of metering
    pub fn stop(&mut self) -> CipResult<()> {
        match self.state {
            MeteringState::Metering | MeteringState::Starting => {
                self.state = MeteringState::Stopping;
                Ok(())
            }
            other => Err(CipError::InvalidData(format!(
                "Cannot stop metering from state {:?}",
                other
            ))),
        }
    }

    /// Advance the state machine by one management cycle
    pub async fn run_cycle(&mut self) {
        match self.state {
            MeteringState::Starting => {
                if self.source.starting_done().await {
                    self.enter_metering().await;
                }
            }
            MeteringState::Metering => {
                let delta_wh = self.source.sample_wh().await;
                self.object.accumulate(delta_wh).await;
            }
            MeteringState::Stopping => {
                if self.source.stopping_done().await {
                    self.enter_not_metering().await;
                }
            }
            MeteringState::NotMetering => {}
        }
    }

    async fn enter_metering(&mut self) {
        self.state = MeteringState::Metering;
        self.object.set_data_status(DATA_STATUS_METERING).await;
        info!(
            "Base Energy instance {} entered Metering",
            self.object.instance_id()
        );
    }

    async fn enter_not_metering(&mut self) {
        self.state = MeteringState::NotMetering;
        self.object.set_data_status(DATA_STATUS_NOT_METERING).await;
        info!(
            "Base Energy instance {} entered NotMetering",
            self.object.instance_id()
        );
    }
}

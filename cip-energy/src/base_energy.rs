//! Base Energy object (Class ID: 0x4E)
//!
//! One instance of this object reports the device's energy metering
//! data. The three odometer attributes (7, 8, 9) carry a custom wire
//! encoding and never go through the generic codec.
//!
//! # Attributes
//!
//! - Attribute 1: energy_resource_type (UINT)
//! - Attribute 2: base_energy_object_capabilities (UINT)
//! - Attribute 3: energy_accuracy (UINT)
//! - Attribute 4: energy_accuracy_basis (UINT)
//! - Attribute 5: full_scale_reading (REAL, settable)
//! - Attribute 6: data_status (UINT)
//! - Attribute 7: consumed_energy odometer (five UINT digit groups)
//! - Attribute 8: produced_energy odometer (five UINT digit groups)
//! - Attribute 9: total_energy odometer (five INT digit groups)
//! - Attribute 10: energy_transfer_rate (REAL)
//! - Attribute 11: energy_transfer_rate_user_setting (REAL, settable)
//! - Attribute 12: energy_type_specific_object_path (EPATH)
//! - Attribute 13: energy_aggregation_path_array_size (UINT)

use crate::metering::DATA_STATUS_NOT_METERING;
use crate::odometer::{EnergyOdometers, WrapMode, encode_signed_odometer, encode_unsigned_odometer};
use cip_codec::{CipDecoder, CipEncoder};
use cip_core::{CipDataType, CipError, CipResult, Epath};
use cip_object::{AttributeCapability, AttributeEntry, AttributeRegistry, CipObject};
use log::debug;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Base Energy Object class code, CIP Vol. 1
pub const BASE_ENERGY_CLASS_CODE: u16 = 0x4E;

/// Implemented class revision
pub const BASE_ENERGY_REVISION: u16 = 2;

const ATTR_CONSUMED_ENERGY: u16 = 7;
const ATTR_PRODUCED_ENERGY: u16 = 8;
const ATTR_TOTAL_ENERGY: u16 = 9;
const ATTR_FULL_SCALE_READING: u16 = 5;
const ATTR_TRANSFER_RATE_USER_SETTING: u16 = 11;

/// Base Energy object instance
///
/// All mutable state sits behind locks so request handling and the
/// cyclic metering update may run concurrently; the three counters
/// share one lock, which keeps encode and accumulate mutually
/// exclusive across all of them.
#[derive(Debug, Clone)]
pub struct BaseEnergyObject {
    instance_id: u16,
    attributes: AttributeRegistry,
    /// #1 Energy/Resource type
    energy_resource_type: u16,
    /// #2 Base Energy Object capabilities
    base_energy_object_capabilities: u16,
    /// #3 Energy accuracy
    energy_accuracy: u16,
    /// #4 Energy accuracy basis
    energy_accuracy_basis: u16,
    /// #5 Full scale energy transfer rate
    full_scale_reading: Arc<RwLock<f32>>,
    /// #6 Status of the instance data
    data_status: Arc<RwLock<u16>>,
    /// #7/#8/#9 The three energy counters
    odometers: Arc<RwLock<EnergyOdometers>>,
    /// #10 Time rate of energy consumption or production
    energy_transfer_rate: Arc<RwLock<f32>>,
    /// #11 User setting for fixed, derived or proxy power value
    energy_transfer_rate_user_setting: Arc<RwLock<f32>>,
    /// #12 Path to the energy-type-specific object instance
    energy_type_specific_object_path: Epath,
    /// #13 Number of members in the aggregation paths array
    energy_aggregation_path_array_size: u16,
}

impl BaseEnergyObject {
    /// Create a new instance with zeroed counters and the single-step
    /// wrap rule
    pub fn new(instance_id: u16) -> CipResult<Self> {
        Self::with_wrap_mode(instance_id, WrapMode::SingleStep)
    }

    /// Create a new instance with an explicit odometer wrap rule
    pub fn with_wrap_mode(instance_id: u16, wrap_mode: WrapMode) -> CipResult<Self> {
        Ok(Self {
            instance_id,
            attributes: Self::build_registry()?,
            energy_resource_type: 0,
            base_energy_object_capabilities: 0,
            energy_accuracy: 0,
            energy_accuracy_basis: 0,
            full_scale_reading: Arc::new(RwLock::new(0.0)),
            // metering starts stopped; the cycle flips this on entry
            data_status: Arc::new(RwLock::new(DATA_STATUS_NOT_METERING)),
            odometers: Arc::new(RwLock::new(EnergyOdometers::with_wrap_mode(wrap_mode))),
            energy_transfer_rate: Arc::new(RwLock::new(0.0)),
            energy_transfer_rate_user_setting: Arc::new(RwLock::new(0.0)),
            energy_type_specific_object_path: Epath::new(0x4F, 1, Some(0)),
            energy_aggregation_path_array_size: 0,
        })
    }

    fn build_registry() -> CipResult<AttributeRegistry> {
        use AttributeCapability::{GetableSingleAndAll, SetAndGetable};
        use CipDataType::{Epath, Opaque, Real, Uint};

        let mut registry = AttributeRegistry::new();
        registry.register(AttributeEntry::new(1, Uint, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(2, Uint, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(3, Uint, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(4, Uint, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(5, Real, SetAndGetable))?;
        registry.register(AttributeEntry::new(6, Uint, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(7, Opaque, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(8, Opaque, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(9, Opaque, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(10, Real, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(11, Real, SetAndGetable))?;
        registry.register(AttributeEntry::new(12, Epath, GetableSingleAndAll))?;
        registry.register(AttributeEntry::new(13, Uint, GetableSingleAndAll))?;
        Ok(registry)
    }

    /// Apply one measured energy delta to the counters
    ///
    /// Invoked once per management cycle by the metering code.
    pub async fn accumulate(&self, delta_wh: i64) {
        self.odometers.write().await.accumulate(delta_wh);
    }

    /// Snapshot of the three counters
    pub async fn odometers(&self) -> EnergyOdometers {
        self.odometers.read().await.clone()
    }

    /// Get the full scale reading
    pub async fn full_scale_reading(&self) -> f32 {
        *self.full_scale_reading.read().await
    }

    /// Get the user transfer-rate setting
    pub async fn energy_transfer_rate_user_setting(&self) -> f32 {
        *self.energy_transfer_rate_user_setting.read().await
    }

    /// Set the measured energy transfer rate
    pub async fn set_energy_transfer_rate(&self, rate: f32) {
        *self.energy_transfer_rate.write().await = rate;
    }

    /// Get the data status
    pub async fn data_status(&self) -> u16 {
        *self.data_status.read().await
    }

    /// Set the data status
    pub async fn set_data_status(&self, status: u16) {
        *self.data_status.write().await = status;
    }

    async fn encode_attribute(&self, attribute_id: u16, encoder: &mut CipEncoder) -> CipResult<()> {
        match attribute_id {
            1 => encoder.encode_u16(self.energy_resource_type),
            2 => encoder.encode_u16(self.base_energy_object_capabilities),
            3 => encoder.encode_u16(self.energy_accuracy),
            4 => encoder.encode_u16(self.energy_accuracy_basis),
            5 => encoder.encode_f32(*self.full_scale_reading.read().await),
            6 => encoder.encode_u16(*self.data_status.read().await),
            ATTR_CONSUMED_ENERGY => {
                let odometers = self.odometers.read().await;
                encode_unsigned_odometer(odometers.consumed_wh(), encoder);
            }
            ATTR_PRODUCED_ENERGY => {
                let odometers = self.odometers.read().await;
                encode_unsigned_odometer(odometers.produced_wh(), encoder);
            }
            ATTR_TOTAL_ENERGY => {
                let odometers = self.odometers.read().await;
                encode_signed_odometer(odometers.total_wh(), encoder);
            }
            10 => encoder.encode_f32(*self.energy_transfer_rate.read().await),
            11 => encoder.encode_f32(*self.energy_transfer_rate_user_setting.read().await),
            12 => encoder.encode_bytes(&self.energy_type_specific_object_path.encode()),
            13 => encoder.encode_u16(self.energy_aggregation_path_array_size),
            other => return Err(CipError::AttributeNotSupported(other)),
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CipObject for BaseEnergyObject {
    fn class_id(&self) -> u16 {
        BASE_ENERGY_CLASS_CODE
    }

    fn instance_id(&self) -> u16 {
        self.instance_id
    }

    async fn get_attribute_single(&self, attribute_id: u16) -> CipResult<Vec<u8>> {
        self.attributes.check_gettable(attribute_id, false)?;
        let mut encoder = CipEncoder::new();
        self.encode_attribute(attribute_id, &mut encoder).await?;
        Ok(encoder.into_bytes())
    }

    async fn get_attribute_all(&self) -> CipResult<Vec<u8>> {
        let mut encoder = CipEncoder::new();
        for entry in self.attributes.iter_gettable_all() {
            self.encode_attribute(entry.id, &mut encoder).await?;
        }
        Ok(encoder.into_bytes())
    }

    async fn set_attribute_single(&self, attribute_id: u16, data: &[u8]) -> CipResult<()> {
        self.attributes.check_settable(attribute_id)?;
        let mut decoder = CipDecoder::new(data);
        match attribute_id {
            ATTR_FULL_SCALE_READING => {
                let value = decoder.decode_f32()?;
                *self.full_scale_reading.write().await = value;
                debug!("full_scale_reading set to {}", value);
            }
            ATTR_TRANSFER_RATE_USER_SETTING => {
                let value = decoder.decode_f32()?;
                *self.energy_transfer_rate_user_setting.write().await = value;
                debug!("energy_transfer_rate_user_setting set to {}", value);
            }
            // A settable attribute without a write handler is reported,
            // not silently accepted.
            other => return Err(CipError::Unimplemented(other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cip_core::GeneralStatus;
    use cip_object::{MessageRouterRequest, dispatch};

    #[tokio::test]
    async fn test_object_identity() {
        let object = BaseEnergyObject::new(1).unwrap();
        assert_eq!(object.class_id(), 0x4E);
        assert_eq!(object.instance_id(), 1);
    }

    #[tokio::test]
    async fn test_get_consumed_energy_after_accumulate() {
        let object = BaseEnergyObject::new(1).unwrap();
        object.accumulate(1500).await;

        // groups [500, 1, 0, 0, 0] as ten little-endian bytes
        let payload = object.get_attribute_single(7).await.unwrap();
        assert_eq!(
            payload,
            vec![0xF4, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[tokio::test]
    async fn test_get_total_energy_signed() {
        let object = BaseEnergyObject::new(1).unwrap();
        object.accumulate(-1_234_567).await;

        let payload = object.get_attribute_single(9).await.unwrap();
        let mut decoder = CipDecoder::new(&payload);
        let groups = [
            decoder.decode_i16().unwrap(),
            decoder.decode_i16().unwrap(),
            decoder.decode_i16().unwrap(),
            decoder.decode_i16().unwrap(),
            decoder.decode_i16().unwrap(),
        ];
        assert_eq!(groups, [-567, -234, -1, 0, 0]);

        // production also shows up in the produced counter
        let payload = object.get_attribute_single(8).await.unwrap();
        assert_eq!(payload[..2], [0x37, 0x02]); // 567
    }

    #[tokio::test]
    async fn test_initial_data_status_is_not_metering() {
        let object = BaseEnergyObject::new(1).unwrap();
        assert_eq!(object.data_status().await, DATA_STATUS_NOT_METERING);

        let payload = object.get_attribute_single(6).await.unwrap();
        assert_eq!(payload, DATA_STATUS_NOT_METERING.to_le_bytes().to_vec());
    }

    #[tokio::test]
    async fn test_get_unknown_attribute() {
        let object = BaseEnergyObject::new(1).unwrap();
        assert!(matches!(
            object.get_attribute_single(14).await,
            Err(CipError::AttributeNotSupported(14))
        ));
        assert!(matches!(
            object.get_attribute_single(0).await,
            Err(CipError::AttributeNotSupported(0))
        ));
    }

    #[tokio::test]
    async fn test_set_full_scale_reading() {
        let object = BaseEnergyObject::new(1).unwrap();
        object
            .set_attribute_single(5, &2.5f32.to_le_bytes())
            .await
            .unwrap();
        assert_eq!(object.full_scale_reading().await, 2.5);

        let payload = object.get_attribute_single(5).await.unwrap();
        assert_eq!(payload, 2.5f32.to_le_bytes().to_vec());
    }

    #[tokio::test]
    async fn test_set_truncated_payload_is_decode_failure() {
        let object = BaseEnergyObject::new(1).unwrap();
        let result = object.set_attribute_single(5, &[0x00, 0x00]).await;
        assert!(matches!(result, Err(CipError::DecodeFailure(_))));
        // stored value untouched
        assert_eq!(object.full_scale_reading().await, 0.0);
    }

    #[tokio::test]
    async fn test_set_read_only_attribute() {
        let object = BaseEnergyObject::new(1).unwrap();
        let result = object.set_attribute_single(7, &[0x00; 10]).await;
        assert!(matches!(result, Err(CipError::AttributeNotSetable(7))));
    }

    #[tokio::test]
    async fn test_set_user_transfer_rate() {
        let object = BaseEnergyObject::new(1).unwrap();
        object
            .set_attribute_single(11, &1.25f32.to_le_bytes())
            .await
            .unwrap();
        assert_eq!(object.energy_transfer_rate_user_setting().await, 1.25);
    }

    #[tokio::test]
    async fn test_get_attribute_all_layout() {
        let object = BaseEnergyObject::new(1).unwrap();
        object.accumulate(1500).await;
        let payload = object.get_attribute_all().await.unwrap();

        // attributes 1..4 and 6: UINT (2 bytes each), 5 and 10 and 11:
        // REAL (4), 7..9: odometers (10), 12: EPATH (8), 13: UINT (2)
        let expected_len = 2 * 4 + 4 + 2 + 10 * 3 + 4 + 4 + 8 + 2;
        assert_eq!(payload.len(), expected_len);

        // attribute 7 starts after 1..6 (four UINTs, one REAL, one UINT)
        let offset = 2 * 4 + 4 + 2;
        assert_eq!(payload[offset], 0xF4);
        assert_eq!(payload[offset + 1], 0x01);
    }

    #[tokio::test]
    async fn test_get_attribute_12_epath() {
        let object = BaseEnergyObject::new(1).unwrap();
        let payload = object.get_attribute_single(12).await.unwrap();
        assert_eq!(
            payload,
            vec![0x03, 0x00, 0x20, 0x4F, 0x24, 0x01, 0x30, 0x00]
        );
    }

    #[tokio::test]
    async fn test_dispatch_end_to_end() {
        let object = BaseEnergyObject::new(1).unwrap();
        object.accumulate(1500).await;

        let response = dispatch(&object, &MessageRouterRequest::get_single(7)).await;
        assert!(response.is_success());
        assert_eq!(response.reply_service, 0x8E);
        assert_eq!(response.data[..4], [0xF4, 0x01, 0x01, 0x00]);

        let response = dispatch(&object, &MessageRouterRequest::set_single(7, vec![0u8; 10])).await;
        assert_eq!(response.general_status, GeneralStatus::AttributeNotSetable);
        assert!(response.data.is_empty());

        let response = dispatch(&object, &MessageRouterRequest::get_single(99)).await;
        assert_eq!(response.general_status, GeneralStatus::AttributeNotSupported);
    }
}

//! Wire messages for `cars.inventory.CarService` (prost, standard protobuf
//! wire format, no `.proto` file).

use crate::catalog::CarRecord;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Car {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub make: String,
    #[prost(string, tag = "3")]
    pub model: String,
}

/// Point lookup. `candidate` is only consulted when `id` is zero.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LookupRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(message, optional, tag = "2")]
    pub candidate: Option<Car>,
}

/// `result` is absent when nothing matched.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LookupResponse {
    #[prost(message, optional, tag = "1")]
    pub result: Option<Car>,
}

/// The deadline travels in the call's `grpc-timeout` header, not here.
#[derive(Clone, PartialEq, prost::Message)]
pub struct BulkRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BulkResponse {
    #[prost(message, repeated, tag = "1")]
    pub result: Vec<Car>,
}

impl From<CarRecord> for Car {
    fn from(record: CarRecord) -> Self {
        Self {
            id: record.id,
            make: record.make,
            model: record.model,
        }
    }
}

impl From<Car> for CarRecord {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            make: car.make,
            model: car.model,
        }
    }
}

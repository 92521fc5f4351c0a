//! Generated protobuf messages, client and server for the kcli inventory service.
//!
//! Built from `proto/kcli.proto`; only the network listing subset is described there.
//! Fields of `network` other than its name are skipped during decoding.

#![allow(missing_docs)]

tonic::include_proto!("kcli");

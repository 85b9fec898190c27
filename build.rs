fn main() {
    // Only run gRPC codegen when the "grpc" feature is enabled.
    // Cargo sets CARGO_FEATURE_GRPC when compiling with --features grpc.
    if std::env::var("CARGO_FEATURE_GRPC").is_ok() {
        let service = tonic_build::manual::Service::builder()
            .name("CarService")
            .package("cars.inventory")
            .method(
                tonic_build::manual::Method::builder()
                    .name("lookup")
                    .route_name("Lookup")
                    .input_type("crate::rpc::messages::LookupRequest")
                    .output_type("crate::rpc::messages::LookupResponse")
                    .codec_path("tonic::codec::ProstCodec")
                    .build(),
            )
            .method(
                tonic_build::manual::Method::builder()
                    .name("bulk_fetch")
                    .route_name("BulkFetch")
                    .input_type("crate::rpc::messages::BulkRequest")
                    .output_type("crate::rpc::messages::BulkResponse")
                    .codec_path("tonic::codec::ProstCodec")
                    .build(),
            )
            .build();

        tonic_build::manual::Builder::new().compile(&[service]);
    }
}

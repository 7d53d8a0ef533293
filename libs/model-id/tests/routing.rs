//! Canonical ids as they travel between a producer and a consumer that share
//! one configuration.

use std::sync::Arc;
use std::thread;

use nameplate_model_id::{DomainPattern, ModelId, ModelIdCodec, ModelIdError};
use nameplate_testing::{myproject_identity, MYPROJECT_DOMAIN_PATTERN};

fn shared_codec() -> Arc<ModelIdCodec> {
    let codec = ModelIdCodec::new(
        Arc::new(myproject_identity()),
        Some(DomainPattern::new(MYPROJECT_DOMAIN_PATTERN)),
    )
    .unwrap();
    Arc::new(codec)
}

#[test]
fn producer_and_consumer_agree() {
    let codec = shared_codec();

    let producer = {
        let codec = codec.clone();
        thread::spawn(move || {
            (0..100)
                .map(|i| codec.encode(&ModelId::new(format!("model{i}"))).unwrap())
                .collect::<Vec<_>>()
        })
    };

    let encoded = producer.join().unwrap();
    let consumers: Vec<_> = encoded
        .chunks(25)
        .map(|chunk| {
            let codec = codec.clone();
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                chunk
                    .iter()
                    .map(|canonical| codec.decode(canonical).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let decoded: Vec<ModelId> = consumers
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(decoded.len(), 100);
    for (i, model) in decoded.iter().enumerate() {
        assert_eq!(model.name, format!("model{i}"));
        assert_eq!(model.env.as_deref(), Some("production"));
        assert_eq!(model.tags["project"], "myproject");
    }
}

#[test]
fn padded_model_roundtrips_captured_fields_only() {
    let codec = shared_codec();
    let identity = myproject_identity();

    let model = ModelId::new("myModel").pad_from(&identity);
    let decoded = codec.decode(&codec.encode(&model).unwrap()).unwrap();

    assert_eq!(decoded.name, model.name);
    assert_eq!(decoded.env, model.env);
    assert_eq!(decoded.tags.get("project"), model.tags.get("project"));
    // app.name is not part of the domain pattern, so it cannot be recovered.
    assert_eq!(decoded.app, None);
    assert!(model.app.is_some());
}

#[test]
fn unconfigured_codec_never_returns_a_string() {
    let codec = ModelIdCodec::unconfigured(Arc::new(myproject_identity()));
    assert_eq!(
        codec.encode(&ModelId::new("myModel")),
        Err(ModelIdError::DomainPatternNotConfigured)
    );
}

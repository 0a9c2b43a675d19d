//! Integration tests for slim-client.
//!
//! These tests run full sessions against an in-process fake server
//! connected through `tokio::io::duplex`.

use slim_client::codec::{decode_nested_value, encode};
use slim_client::protocol::{Answer, Instruction, InstructionBatch, NestedValue};
use slim_client::{Client, ParseFailure, SlimError};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

/// Read one length-prefixed request from the server side of the pipe.
async fn read_request(server: &mut DuplexStream) -> NestedValue {
    let mut header = [0u8; 6];
    server.read_exact(&mut header).await.unwrap();
    let length: usize = std::str::from_utf8(&header).unwrap().parse().unwrap();

    let mut body = vec![0u8; length + 1];
    server.read_exact(&mut body).await.unwrap();

    let mut request = header.to_vec();
    request.extend_from_slice(&body);
    decode_nested_value(&request).unwrap()
}

/// Build `[[id, result], ...]` and send it.
async fn reply(server: &mut DuplexStream, pairs: &[(&str, &str)]) {
    let batch = NestedValue::list(pairs.iter().map(|(id, result)| NestedValue::list([*id, *result])));
    server
        .write_all(encode(&batch).unwrap().as_bytes())
        .await
        .unwrap();
}

/// Test the fraction scenario end to end.
#[tokio::test]
async fn test_fraction_session() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    let server = tokio::spawn(async move {
        let request = read_request(&mut server_side).await;
        reply(
            &mut server_side,
            &[
                ("1", "OK"),
                ("2", "/__VOID__/"),
                ("3", "/__VOID__/"),
                ("4", "5.0"),
            ],
        )
        .await;
        request
    });

    let instructions = vec![
        Instruction::Make {
            id: "1".to_string(),
            instance: "fraction".to_string(),
            class: "Fraction".to_string(),
            arguments: vec![],
        },
        Instruction::Call {
            id: "2".to_string(),
            instance: "fraction".to_string(),
            method: "setNumerator".to_string(),
            arguments: vec!["10".to_string()],
        },
        Instruction::Call {
            id: "3".to_string(),
            instance: "fraction".to_string(),
            method: "setDenominator".to_string(),
            arguments: vec!["2".to_string()],
        },
        Instruction::Call {
            id: "4".to_string(),
            instance: "fraction".to_string(),
            method: "quotient".to_string(),
            arguments: vec![],
        },
    ];

    let mut client = Client::builder().build(client_side);
    let results = client.execute(instructions.clone()).await.unwrap();

    assert_eq!(results.len(), 4);
    let answers: Vec<&Answer> = results.iter().map(|(_, answer)| answer).collect();
    assert_eq!(answers[0], &Answer::Ok(NestedValue::scalar("OK")));
    assert!(answers[1].is_void());
    assert!(answers[2].is_void());
    assert_eq!(answers[3], &Answer::Ok(NestedValue::scalar("5.0")));

    // The server saw each instruction in order.
    let request = server.await.unwrap();
    let sent = request.as_list().unwrap();
    assert_eq!(sent.len(), 4);
    assert_eq!(
        sent[1],
        NestedValue::list(["2", "call", "fraction", "setNumerator", "10"])
    );
}

/// Test that the wire bytes of a request are exactly the encoded batch.
#[tokio::test]
async fn test_request_bytes_on_the_wire() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    let make = Instruction::Make {
        id: "id_2".to_string(),
        instance: "toto".to_string(),
        class: "some.Class".to_string(),
        arguments: vec!["1".to_string(), "arg".to_string()],
    };
    let expected = encode(&vec![make.clone()]).unwrap();
    let expected_len = expected.len();

    let server = tokio::spawn(async move {
        let mut raw = vec![0u8; expected_len];
        server_side.read_exact(&mut raw).await.unwrap();
        reply(&mut server_side, &[("id_2", "OK")]).await;
        raw
    });

    let mut client = Client::builder().build(client_side);
    client.execute(vec![make]).await.unwrap();

    let raw = server.await.unwrap();
    assert_eq!(String::from_utf8(raw).unwrap(), expected);
    assert!(expected.contains(
        "000083:[000006:000004:id_2:000004:make:000004:toto:000010:some.Class:000001:1:000003:arg:]"
    ));
}

/// Test exception answers and out-of-order replies.
#[tokio::test]
async fn test_exception_and_reordered_answers() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        reply(
            &mut server_side,
            &[
                ("id_2", "__EXCEPTION__:message:<<NO_CLASS Missing>>"),
                ("id_1", "OK"),
            ],
        )
        .await;
    });

    let mut batch = InstructionBatch::new();
    batch.import("fitnesse.slim.test");
    batch.make("missing", "Missing", Vec::<String>::new());

    let mut client = Client::builder().build(client_side);
    let results = client.execute_batch(batch).await.unwrap();

    assert_eq!(results[0].0.id(), "id_1");
    assert_eq!(results[0].1, Answer::Ok(NestedValue::scalar("OK")));
    assert_eq!(results[1].0.id(), "id_2");
    assert_eq!(
        results[1].1.exception_message(),
        Some("message:<<NO_CLASS Missing>>")
    );
}

/// Test that a response split into tiny chunks is reassembled.
#[tokio::test]
async fn test_fragmented_response() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        let batch = NestedValue::list([NestedValue::list(["id_1", "OK"])]);
        let encoded = encode(&batch).unwrap();
        for chunk in encoded.as_bytes().chunks(3) {
            server_side.write_all(chunk).await.unwrap();
            tokio::task::yield_now().await;
        }
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder().read_buffer_size(4).build(client_side);
    let results = client.execute_batch(batch).await.unwrap();
    assert_eq!(results[0].1, Answer::Ok(NestedValue::scalar("OK")));
}

/// Test two requests over one session.
#[tokio::test]
async fn test_sequential_requests() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        reply(&mut server_side, &[("a_1", "first")]).await;
        read_request(&mut server_side).await;
        reply(&mut server_side, &[("b_1", "second")]).await;
    });

    let mut client = Client::builder().build(client_side);

    let mut first = InstructionBatch::with_prefix("a");
    first.call("x", "get", Vec::<String>::new());
    let results = client.execute_batch(first).await.unwrap();
    assert_eq!(results[0].1, Answer::Ok(NestedValue::scalar("first")));

    let mut second = InstructionBatch::with_prefix("b");
    second.call("x", "get", Vec::<String>::new());
    let results = client.execute_batch(second).await.unwrap();
    assert_eq!(results[0].1, Answer::Ok(NestedValue::scalar("second")));
}

/// Test that a missing answer surfaces as a correlation miss.
#[tokio::test]
async fn test_missing_answer() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        reply(&mut server_side, &[("id_1", "OK")]).await;
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");
    batch.call("x", "get", Vec::<String>::new());

    let mut client = Client::builder().build(client_side);
    let result = client.execute_batch(batch).await;

    assert!(matches!(
        result,
        Err(SlimError::CorrelationMiss { ref id }) if id == "id_2"
    ));
}

/// Test that a malformed response is a parse error, not a panic.
#[tokio::test]
async fn test_malformed_response() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        server_side.write_all(b"000002-OK").await.unwrap();
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder().build(client_side);
    let result = client.execute_batch(batch).await;

    assert!(
        matches!(
            result,
            Err(SlimError::Parse(ParseFailure::MalformedDelimiter { offset: 6 }))
        ),
        "unexpected result: {:?}",
        result
    );
}

/// Test that a broken list body surfaces as a list parse error.
#[tokio::test]
async fn test_broken_list_body() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        // Framed correctly, but the list inside is missing its ':' terminators.
        server_side.write_all(b"000011:[000001:OK]").await.unwrap();
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder().build(client_side);
    let result = client.execute_batch(batch).await;

    assert!(
        matches!(
            result,
            Err(SlimError::Parse(ParseFailure::MalformedList { .. }))
        ),
        "unexpected result: {:?}",
        result
    );
}

/// Test that a nested length disagreement is rejected in strict mode.
#[tokio::test]
async fn test_nested_length_mismatch_response() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        server_side
            .write_all(b"000027:[000001:000010:[000000:]x:]")
            .await
            .unwrap();
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder().build(client_side);
    let result = client.execute_batch(batch).await;

    assert!(
        matches!(
            result,
            Err(SlimError::Parse(ParseFailure::LengthMismatch {
                declared: 10,
                actual: 9,
                ..
            }))
        ),
        "unexpected result: {:?}",
        result
    );
}

/// Test that a scalar response is rejected as a batch.
#[tokio::test]
async fn test_scalar_response_is_protocol_error() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        server_side.write_all(b"000002:OK").await.unwrap();
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder().build(client_side);
    let result = client.execute_batch(batch).await;
    assert!(matches!(result, Err(SlimError::Protocol(_))));
}

/// Test the response size cap.
#[tokio::test]
async fn test_response_too_large() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        server_side.write_all(b"005000:").await.unwrap();
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder()
        .max_response_size(1000)
        .build(client_side);
    let result = client.execute_batch(batch).await;
    assert!(matches!(result, Err(SlimError::Protocol(ref msg)) if msg.contains("exceeds maximum")));
}

/// Test server hang-up before the response completes.
#[tokio::test]
async fn test_connection_closed_mid_response() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        read_request(&mut server_side).await;
        server_side.write_all(b"000050:[000001:").await.unwrap();
        drop(server_side);
    });

    let mut batch = InstructionBatch::new();
    batch.import("p");

    let mut client = Client::builder().build(client_side);
    let result = client.execute_batch(batch).await;
    assert!(matches!(result, Err(SlimError::ConnectionClosed)));
}

/// Test that bye sends the bye scalar and closes the write half.
#[tokio::test]
async fn test_bye() {
    let (client_side, mut server_side) = tokio::io::duplex(4096);

    let client = Client::builder().build(client_side);
    client.bye().await.unwrap();

    let mut received = Vec::new();
    server_side.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"000003:bye");
}

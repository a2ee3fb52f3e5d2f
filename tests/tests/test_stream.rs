// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use mopack::{BufferPool, Error, MessageReader, Mopack, Value};
use tokio::io::{AsyncRead, ReadBuf};

/// Byte source handing out one predetermined chunk per read call, then
/// reporting end of stream.
struct ChunkedSource {
    chunks: VecDeque<Vec<u8>>,
}

impl ChunkedSource {
    fn new<I>(chunks: I) -> ChunkedSource
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        ChunkedSource {
            chunks: chunks.into_iter().collect(),
        }
    }

    fn whole(bytes: &[u8]) -> ChunkedSource {
        ChunkedSource::new([bytes.to_vec()])
    }

    fn byte_at_a_time(bytes: &[u8]) -> ChunkedSource {
        ChunkedSource::new(bytes.iter().map(|&b| vec![b]))
    }
}

impl AsyncRead for ChunkedSource {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if let Some(chunk) = self.chunks.front_mut() {
            let n = chunk.len().min(buf.remaining());
            buf.put_slice(&chunk[..n]);
            chunk.drain(..n);
            if chunk.is_empty() {
                self.chunks.pop_front();
            }
        }
        Poll::Ready(Ok(()))
    }
}

fn sample_messages() -> (Vec<Vec<u8>>, Vec<u8>) {
    let engine = Mopack::new();
    let messages = vec![
        engine.serialize(&Value::Str("hello stream".into())).unwrap(),
        engine
            .serialize(&Value::Array(vec![
                Value::Int(-5),
                Value::UInt(70_000),
                Value::Nil,
            ]))
            .unwrap(),
        engine
            .serialize(&Value::Map(vec![(
                Value::Str("key".into()),
                Value::Bin(vec![1, 2, 3]),
            )]))
            .unwrap(),
        engine.serialize(&Value::F64(1.25)).unwrap(),
    ];
    let concatenated = messages.concat();
    (messages, concatenated)
}

#[tokio::test]
async fn test_chunked_delivery_is_equivalent_to_whole_delivery() {
    let (messages, concatenated) = sample_messages();

    let mut whole = MessageReader::new(ChunkedSource::whole(&concatenated));
    let mut dribble = MessageReader::new(ChunkedSource::byte_at_a_time(&concatenated));
    for expected in &messages {
        assert_eq!(whole.next_message().await.unwrap().unwrap(), expected);
        assert_eq!(dribble.next_message().await.unwrap().unwrap(), expected);
    }
    assert_eq!(whole.next_message().await.unwrap(), None);
    assert_eq!(dribble.next_message().await.unwrap(), None);
}

#[tokio::test]
async fn test_uneven_chunk_boundaries() {
    let (messages, concatenated) = sample_messages();
    // split across headers and payloads alike
    for chunk_size in [2usize, 3, 7, 11] {
        let chunks = concatenated.chunks(chunk_size).map(<[u8]>::to_vec);
        let mut reader = MessageReader::new(ChunkedSource::new(chunks));
        for expected in &messages {
            assert_eq!(reader.next_message().await.unwrap().unwrap(), expected);
        }
        assert_eq!(reader.next_message().await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_empty_source_is_clean_end_of_stream() {
    let mut reader = MessageReader::new(ChunkedSource::new([]));
    assert_eq!(reader.next_message().await.unwrap(), None);
    // still clean on a second ask
    assert_eq!(reader.next_message().await.unwrap(), None);
}

#[tokio::test]
async fn test_source_closing_mid_message_is_truncation() {
    let engine = Mopack::new();
    let message = engine.serialize(&Value::Str("x".repeat(100))).unwrap();
    let half = message.len() / 2;
    let mut reader = MessageReader::new(ChunkedSource::whole(&message[..half]));
    match reader.next_message().await {
        Err(Error::TruncatedStream(buffered)) => assert_eq!(buffered, half),
        other => panic!("expected TruncatedStream, got {other:?}"),
    }
}

#[tokio::test]
async fn test_trailing_bytes_are_preserved() {
    let engine = Mopack::new();
    let message = engine.serialize(&Value::UInt(300)).unwrap();
    let trailing = [0x00, 0xff, 0x13, 0x37];
    let mut stream = message.clone();
    stream.extend_from_slice(&trailing);

    let mut reader = MessageReader::new(ChunkedSource::whole(&stream));
    assert_eq!(reader.next_message().await.unwrap().unwrap(), &message);
    assert_eq!(reader.remaining_bytes(), trailing);
}

#[tokio::test]
async fn test_malformed_leading_byte_fails_without_waiting() {
    // 0xc1 first, valid data after: the error must not wait for more input
    let mut reader = MessageReader::new(ChunkedSource::new([vec![0xc1], vec![0x01, 0x02]]));
    match reader.next_message().await {
        Err(Error::InvalidFormat(0xc1, 0)) => {}
        other => panic!("expected InvalidFormat, got {other:?}"),
    }
}

#[tokio::test]
async fn test_array_header_then_elements() {
    // [int 1, str "ab", nil] delivered byte by byte
    let stream = [0x93, 0x01, 0xa2, b'a', b'b', 0xc0];
    let mut reader = MessageReader::new(ChunkedSource::byte_at_a_time(&stream));
    assert_eq!(reader.read_array_header().await.unwrap(), 3);
    assert_eq!(reader.next_message().await.unwrap().unwrap(), &[0x01][..]);
    assert_eq!(
        reader.next_message().await.unwrap().unwrap(),
        &[0xa2, b'a', b'b'][..]
    );
    assert_eq!(reader.next_message().await.unwrap().unwrap(), &[0xc0][..]);
    assert_eq!(reader.next_message().await.unwrap(), None);
}

#[tokio::test]
async fn test_map_header_then_pairs() {
    // {"a": 1, "b": 2}
    let stream = [0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x02];
    let mut reader = MessageReader::new(ChunkedSource::whole(&stream));
    let pairs = reader.read_map_header().await.unwrap();
    assert_eq!(pairs, 2);
    let mut decoded = Vec::new();
    for _ in 0..pairs * 2 {
        decoded.push(reader.next_message().await.unwrap().unwrap());
    }
    assert_eq!(decoded[0], &[0xa1, b'a'][..]);
    assert_eq!(decoded[3], &[0x02][..]);
}

#[tokio::test]
async fn test_header_read_at_end_of_source_is_truncation() {
    let mut reader = MessageReader::new(ChunkedSource::new([]));
    assert!(matches!(
        reader.read_array_header().await,
        Err(Error::TruncatedStream(0))
    ));
}

#[tokio::test]
async fn test_reader_returns_its_buffer_to_the_pool() {
    let pool = BufferPool::new(4, 8192);
    assert_eq!(pool.idle(), 0);
    {
        let mut reader =
            MessageReader::with_pool(ChunkedSource::whole(&[0x2a]), &pool);
        assert_eq!(reader.next_message().await.unwrap().unwrap(), &[0x2a][..]);
    }
    assert_eq!(pool.idle(), 1);
    // the returned buffer was cleared and keeps real capacity
    let rental = pool.rent();
    assert!(rental.is_empty());
    assert!(rental.capacity() >= mopack::MIN_SEGMENT_SIZE);
}

//! Benchmarks for the packet wire format

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scribe_core::EncoderReading;
use scribe_wire::{PacketDecoder, RawPacket, PACKET_SIZE};

fn bench_packet_decode(c: &mut Criterion) {
    let bytes = PacketDecoder::to_bytes(&EncoderReading::new([15971, 24861, 26802, 16387, 13068]));

    c.bench_function("packet_decode", |b| {
        b.iter(|| PacketDecoder::decode(black_box(&bytes)))
    });
}

fn bench_packet_reject(c: &mut Criterion) {
    let bytes = [0u8; PACKET_SIZE - 1];

    c.bench_function("packet_reject_short", |b| {
        b.iter(|| PacketDecoder::decode(black_box(&bytes)))
    });
}

fn bench_raw_packet(c: &mut Criterion) {
    let packet = RawPacket::from_reading(&EncoderReading::new([1, -2, 3, -4, 5]));

    c.bench_function("raw_packet_reading", |b| {
        b.iter(|| black_box(&packet).reading())
    });
}

criterion_group!(benches, bench_packet_decode, bench_packet_reject, bench_raw_packet);
criterion_main!(benches);

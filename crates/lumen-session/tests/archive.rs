//! Archive-level options: password protection, the two container
//! formats and compression settings.

use lumen_data::{ElementType, Image, Object, PixelFormat, Text, object_of};
use lumen_session::{SessionError, SessionReader, SessionWriter};
use lumen_zip::{ArchiveError, ArchiveFormat, Compression};

fn sample_image() -> Image {
    let mut image = Image::default();
    image.resize([2, 2, 1], ElementType::Uint8, PixelFormat::GrayScale);
    image.buffer_mut().copy_from_slice(&[1, 2, 3, 4]);
    image
}

#[test]
fn encrypted_sessions_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lis");
    let object = object_of(sample_image());

    let mut writer = SessionWriter::new();
    writer.set_password("correct horse battery");
    writer.write(&path, &object).unwrap();

    let mut reader = SessionReader::new();
    reader.set_password("correct horse battery");
    assert_eq!(reader.read(&path).unwrap(), object);
}

#[test]
fn encrypted_sessions_reject_wrong_passwords() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lis");

    let mut writer = SessionWriter::new();
    writer.set_password("right");
    writer.write(&path, &object_of(Text::new("secret"))).unwrap();

    let mut reader = SessionReader::new();
    reader.set_password("wrong");
    let err = reader.read(&path).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Archive(ArchiveError::WrongPassword { .. })
    ));

    // The tree itself is encrypted, so a password-less read fails too.
    let mut reader = SessionReader::new();
    assert!(reader.read(&path).is_err());
}

#[test]
fn filesystem_sessions_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session");
    let object = object_of(sample_image());

    let mut writer = SessionWriter::new();
    writer.set_archive_format(ArchiveFormat::Filesystem);
    writer.write(&path, &object).unwrap();

    // The layout is an open directory with the tree beside the blobs.
    assert!(path.is_dir());
    assert!(path.join("root.json").is_file());

    let mut reader = SessionReader::new();
    assert_eq!(reader.read(&path).unwrap(), object);
}

#[test]
fn filesystem_sessions_cannot_be_encrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session");

    let mut writer = SessionWriter::new();
    writer
        .set_archive_format(ArchiveFormat::Filesystem)
        .set_password("secret");
    let err = writer
        .write(&path, &object_of(Text::new("payload")))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Archive(ArchiveError::EncryptionUnsupported)
    ));
}

#[test]
fn stored_compression_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lis");
    let object = object_of(sample_image());

    let mut writer = SessionWriter::new();
    writer.set_compression(Compression::Stored, None);
    writer.write(&path, &object).unwrap();

    let mut reader = SessionReader::new();
    assert_eq!(reader.read(&path).unwrap(), object);
}

#[test]
fn default_sessions_need_no_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lis");
    let object: Object = object_of(Text::new("plain"));

    SessionWriter::default().write(&path, &object).unwrap();
    assert_eq!(SessionReader::default().read(&path).unwrap(), object);
}

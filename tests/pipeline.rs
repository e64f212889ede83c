// End-to-end: upload -> depth map -> two displaced meshes -> render buffers

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Cursor;

use depthfy::{
    HttpResponse, InferenceClient, MeshBuffers, MeshKind, Notifier, Result, ServiceConfig, Transport,
    UploadFile, Viewer, ViewerConfig, ViewerError, submit,
};
use image::{ImageFormat, Rgba, RgbaImage};

const BASE: &str = "https://depth.test";

struct FakeService {
    upload_status: u16,
    files: HashMap<String, Vec<u8>>,
    calls: Cell<usize>,
}

impl FakeService {
    fn new(upload_status: u16, depth_png: Vec<u8>, photo_png: Vec<u8>) -> Self {
        let mut files = HashMap::new();
        files.insert(format!("{}/static/depth_map.png", BASE), depth_png);
        files.insert(format!("{}/static/photo.png", BASE), photo_png);
        Self { upload_status, files, calls: Cell::new(0) }
    }
}

impl Transport for FakeService {
    async fn post_file(&self, url: &str, field: &str, _file: &UploadFile) -> Result<HttpResponse> {
        self.calls.set(self.calls.get() + 1);
        assert_eq!(url, format!("{}/upload", BASE));
        assert_eq!(field, "file");
        let body = if self.upload_status < 400 {
            br#"{"depth_map_url": "/static/depth_map.png", "original_image_url": "/static/photo.png"}"#.to_vec()
        } else {
            br#"{"error": "boom"}"#.to_vec()
        };
        Ok(HttpResponse { status: self.upload_status, body })
    }

    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.calls.set(self.calls.get() + 1);
        Ok(match self.files.get(url) {
            Some(body) => HttpResponse { status: 200, body: body.clone() },
            None => HttpResponse { status: 404, body: Vec::new() },
        })
    }
}

#[derive(Default)]
struct Alerts(RefCell<Vec<String>>);

impl Notifier for Alerts {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

fn png_from_reds(width: u32, height: u32, reds: &[u8]) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let r = reds[(y * width + x) as usize];
        Rgba([r, r, r, 255])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn viewer() -> RefCell<Viewer> {
    let config = ViewerConfig::from_json(&format!(r#"{{ "service": {{ "base_url": "{}" }} }}"#, BASE))
        .unwrap();
    RefCell::new(Viewer::new(config))
}

fn client(service: FakeService) -> InferenceClient<FakeService> {
    let config = ServiceConfig { base_url: BASE.into(), ..ServiceConfig::default() };
    InferenceClient::new(service, config)
}

fn photo() -> Option<UploadFile> {
    Some(UploadFile::new("photo.png", vec![0; 8]))
}

fn z_values(viewer: &Viewer, kind: MeshKind) -> Vec<f32> {
    let mesh = &viewer.scene().unwrap().view_of(kind).mesh;
    mesh.positions().chunks(3).map(|p| p[2]).collect()
}

#[test]
fn white_four_by_four() {
    let viewer = viewer();
    let service = FakeService::new(200, png_from_reds(4, 4, &[255; 16]), png_from_reds(4, 4, &[7; 16]));
    let client = client(service);

    pollster::block_on(submit(&viewer, &client, &Alerts::default(), photo())).unwrap();

    let v = viewer.borrow();
    let scene = v.scene().unwrap();
    assert_eq!(scene.grid().to_vec(), vec![1.0; 16]);
    for kind in MeshKind::ALL {
        assert_eq!(z_values(&v, kind), vec![1.0; 16]);
    }
}

#[test]
fn two_by_two_row_major() {
    let viewer = viewer();
    let service =
        FakeService::new(200, png_from_reds(2, 2, &[0, 128, 255, 64]), png_from_reds(3, 3, &[1; 9]));
    let client = client(service);

    pollster::block_on(submit(&viewer, &client, &Alerts::default(), photo())).unwrap();

    let v = viewer.borrow();
    let expected = [0.0, 0.502, 1.0, 0.251];
    let grid = v.scene().unwrap().grid().to_vec();
    for kind in MeshKind::ALL {
        let zs = z_values(&v, kind);
        assert_eq!(zs.len(), 4);
        for i in 0..4 {
            assert!((grid[i] - expected[i]).abs() < 1e-3, "grid[{}] = {}", i, grid[i]);
            assert_eq!(zs[i], grid[i]);
        }
    }
}

#[test]
fn no_file_sends_nothing() {
    let viewer = viewer();
    let client = client(FakeService::new(200, Vec::new(), Vec::new()));
    let alerts = Alerts::default();

    let err = pollster::block_on(submit(&viewer, &client, &alerts, None::<UploadFile>)).unwrap_err();

    assert!(matches!(err, ViewerError::NoFileSelected));
    assert_eq!(client.transport().calls.get(), 0);
    assert_eq!(alerts.0.borrow().len(), 1);
}

#[test]
fn server_error_keeps_displayed_meshes() {
    let viewer = viewer();
    let ok = client(FakeService::new(200, png_from_reds(2, 2, &[10, 20, 30, 40]), png_from_reds(2, 2, &[0; 4])));
    pollster::block_on(submit(&viewer, &ok, &Alerts::default(), photo())).unwrap();
    let before = z_values(&viewer.borrow(), MeshKind::Textured);
    let urls_before = viewer.borrow().urls().cloned();

    let failing = client(FakeService::new(503, png_from_reds(2, 2, &[255; 4]), Vec::new()));
    let alerts = Alerts::default();
    let err = pollster::block_on(submit(&viewer, &failing, &alerts, photo())).unwrap_err();

    assert!(matches!(err, ViewerError::NetworkOrServer(_)));
    assert!(err.is_external());
    assert_eq!(alerts.0.borrow().as_slice(), ["Something went wrong."]);
    assert_eq!(failing.transport().calls.get(), 1);
    let v = viewer.borrow();
    assert_eq!(z_values(&v, MeshKind::Textured), before);
    assert_eq!(v.urls().cloned(), urls_before);
}

#[test]
fn render_buffers_follow_new_upload() {
    let viewer = viewer();
    let mut buffers = MeshBuffers::new();

    let first = client(FakeService::new(200, png_from_reds(2, 2, &[0; 4]), png_from_reds(2, 2, &[0; 4])));
    pollster::block_on(submit(&viewer, &first, &Alerts::default(), photo())).unwrap();
    {
        let mut v = viewer.borrow_mut();
        let mesh = &mut v.scene_mut().unwrap().view_mut(MeshKind::Depth).mesh;
        assert!(buffers.sync(mesh));
        assert!(!buffers.sync(mesh));
    }
    assert_eq!(buffers.indices().len(), 6);

    let second = client(FakeService::new(200, png_from_reds(3, 2, &[255; 6]), png_from_reds(2, 2, &[0; 4])));
    pollster::block_on(submit(&viewer, &second, &Alerts::default(), photo())).unwrap();
    let mut v = viewer.borrow_mut();
    let mesh = &mut v.scene_mut().unwrap().view_mut(MeshKind::Depth).mesh;
    assert!(buffers.sync(mesh));
    assert_eq!(buffers.positions().len(), 6 * 3);
    assert_eq!(buffers.indices().len(), 2 * 6);
    assert!(buffers.positions().chunks(3).all(|p| p[2] == 1.0));
}
